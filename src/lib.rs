pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::session_store::{DbSessionStore, SessionStore};
use crate::services::{
    notification_service::NotificationService, resume_service::ResumeService,
    session_service::SessionService, voice_service::VoiceService,
};
use reqwest::Client;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub resume_service: ResumeService,
    pub session_service: SessionService,
    pub voice_service: VoiceService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let store: Arc<dyn SessionStore> = Arc::new(DbSessionStore::new(pool.clone()));
        Self::with_store(pool, store)
    }

    /// Lets tests (and ephemeral deployments) swap in the in-memory store.
    pub fn with_store(pool: SqlitePool, store: Arc<dyn SessionStore>) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();

        let resume_service = ResumeService::new();
        let voice_service = VoiceService::new(
            config.voice_api_url.clone(),
            config.voice_api_key.clone(),
            http_client,
            config.follow_up_seed,
        );
        let notification_service = NotificationService::default();
        let session_service = SessionService::new(
            store,
            voice_service.clone(),
            notification_service.clone(),
        );

        Self {
            pool,
            resume_service,
            session_service,
            voice_service,
            notification_service,
        }
    }
}
