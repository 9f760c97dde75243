// src/services/guest_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    common::{error::AppError, scope::TenantScope},
    db::GuestRepository,
    models::{
        booking::validate_stay,
        guest::{Guest, GuestFields},
    },
};

#[derive(Clone)]
pub struct GuestService {
    guests: GuestRepository,
    pool: PgPool,
}

impl GuestService {
    pub fn new(guests: GuestRepository, pool: PgPool) -> Self {
        Self { guests, pool }
    }

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<Guest>, AppError> {
        self.guests.list(scope).await
    }

    pub async fn get(&self, scope: TenantScope, guest_id: Uuid) -> Result<Guest, AppError> {
        self.guests
            .find(&self.pool, scope, guest_id)
            .await?
            .ok_or(AppError::NotFound("Hóspede"))
    }

    pub async fn create(&self, scope: TenantScope, fields: &GuestFields) -> Result<Guest, AppError> {
        check_stay(fields)?;
        self.guests.create(&self.pool, scope, fields).await
    }

    pub async fn update(
        &self,
        scope: TenantScope,
        guest_id: Uuid,
        fields: &GuestFields,
    ) -> Result<Guest, AppError> {
        check_stay(fields)?;
        self.guests
            .update(&self.pool, scope, guest_id, fields)
            .await?
            .ok_or(AppError::NotFound("Hóspede"))
    }

    pub async fn delete(&self, scope: TenantScope, guest_id: Uuid) -> Result<(), AppError> {
        let deleted = self.guests.delete(&self.pool, scope, guest_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Hóspede"));
        }
        Ok(())
    }
}

// As datas do hóspede são opcionais; só comparamos quando vêm as duas.
fn check_stay(fields: &GuestFields) -> Result<(), AppError> {
    if let (Some(check_in), Some(check_out)) = (fields.check_in_date, fields.check_out_date) {
        validate_stay(check_in, check_out).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("checkOutDate", e);
            AppError::ValidationError(errors)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{day, seed_guest, seed_tenant};

    fn fields(check_in: Option<&str>, check_out: Option<&str>) -> GuestFields {
        GuestFields {
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "ana@example.com".into(),
            phone: "11 99999-0000".into(),
            check_in_date: check_in.map(day),
            check_out_date: check_out.map(day),
        }
    }

    #[test]
    fn stay_dates_are_optional_but_ordered() {
        assert!(check_stay(&fields(None, None)).is_ok());
        assert!(check_stay(&fields(Some("2026-01-10"), None)).is_ok());
        assert!(check_stay(&fields(Some("2026-01-10"), Some("2026-01-10"))).is_ok());

        match check_stay(&fields(Some("2026-01-12"), Some("2026-01-10"))) {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key("checkOutDate"))
            }
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn guests_are_isolated_per_hotel(pool: PgPool) {
        let hotel = seed_tenant(&pool, "Hotel").await;
        let other = seed_tenant(&pool, "Outro").await;
        let svc = GuestService::new(GuestRepository::new(pool.clone()), pool.clone());
        let guest = seed_guest(&pool, hotel, "Ana").await;

        assert_eq!(svc.list(hotel).await.unwrap().len(), 1);
        assert!(svc.list(other).await.unwrap().is_empty());
        assert!(matches!(svc.get(other, guest.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            svc.update(other, guest.id, &fields(None, None)).await,
            Err(AppError::NotFound(_))
        ));

        let updated = svc.update(hotel, guest.id, &fields(Some("2026-01-10"), None)).await.unwrap();
        assert_eq!(updated.last_name, "Souza");

        svc.delete(hotel, guest.id).await.unwrap();
        assert!(matches!(svc.delete(hotel, guest.id).await, Err(AppError::NotFound(_))));
    }
}
