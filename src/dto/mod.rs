pub mod application_dto;
pub mod auth_dto;
pub mod notification_dto;
pub mod offer_dto;
pub mod pagination;
pub mod profile_dto;
