pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod guest;
pub mod hotel;
pub mod notification;
pub mod room;
