// src/services/dashboard_service.rs

use crate::{
    common::{error::AppError, scope::TenantScope},
    db::DashboardRepository,
    models::dashboard::DashboardSummary,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, scope: TenantScope) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary(scope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{BookingRepository, GuestRepository, RoomRepository},
        models::booking::BookingRequest,
        services::{allocator::RoomAllocator, booking_service::BookingService},
        test_support::{day, seed_guest, seed_room, seed_tenant},
    };
    use sqlx::PgPool;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn summary_counts_only_the_tenant(pool: PgPool) {
        let hotel = seed_tenant(&pool, "Hotel").await;
        let other = seed_tenant(&pool, "Outro").await;
        let guest = seed_guest(&pool, hotel, "Ana").await;
        let booked = seed_room(&pool, hotel, "101").await;
        seed_room(&pool, hotel, "102").await;
        seed_room(&pool, other, "201").await;

        let rooms = RoomRepository::new(pool.clone());
        BookingService::new(
            BookingRepository::new(pool.clone()),
            GuestRepository::new(pool.clone()),
            rooms.clone(),
            RoomAllocator::new(rooms),
            pool.clone(),
        )
        .create(
            hotel,
            BookingRequest {
                guest_id: guest.id,
                room_id: booked.id,
                check_in_date: day("2026-01-10"),
                check_out_date: day("2026-01-12"),
            },
        )
        .await
        .unwrap();

        let summary = DashboardService::new(DashboardRepository::new(pool.clone()))
            .get_summary(hotel)
            .await
            .unwrap();

        assert_eq!(summary.rooms_total, 2);
        assert_eq!(summary.rooms_available, 1);
        assert_eq!(summary.rooms_occupied, 1);
        assert_eq!(summary.rooms_maintenance, 0);
        assert_eq!(summary.guests, 1);
        assert_eq!(summary.bookings, 1);
        assert_eq!(summary.unread_notifications, 0);
    }
}
