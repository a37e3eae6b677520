pub mod application;
pub mod notification;
pub mod offer;
pub mod user;
