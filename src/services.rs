pub mod allocator;
pub mod auth;
pub mod booking_service;
pub mod dashboard_service;
pub mod guest_service;
pub mod notification_service;
pub mod room_service;
pub mod tenancy_service;
