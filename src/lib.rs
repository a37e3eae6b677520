pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod services;
pub mod utils;

use crate::realtime::push::LivePush;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    notification_service::NotificationService, offer_service::OfferService,
    profile_service::ProfileService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub offer_service: OfferService,
    pub application_service: ApplicationService,
    pub notification_service: NotificationService,
    pub profile_service: ProfileService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        let push = LivePush::new(
            http_client,
            config.push_gateway_url.clone(),
            config.push_secret.clone(),
        );

        let auth_service = AuthService::new(pool.clone());
        let offer_service = OfferService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());
        let application_service =
            ApplicationService::new(pool.clone(), notification_service.clone(), push);
        let profile_service = ProfileService::new(pool.clone());

        Self {
            pool,
            auth_service,
            offer_service,
            application_service,
            notification_service,
            profile_service,
        }
    }
}
