pub mod application_service;
pub mod auth_service;
pub mod notification_service;
pub mod offer_service;
pub mod profile_service;
