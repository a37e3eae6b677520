pub mod applications;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod offers;
pub mod profile;
