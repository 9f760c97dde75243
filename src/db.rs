pub mod user_repo;
pub use user_repo::UserRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod room_repo;
pub use room_repo::RoomRepository;
pub mod guest_repo;
pub use guest_repo::GuestRepository;
pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
