use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub public_rps: u32,
    pub max_session_questions: usize,
    pub voice_api_url: Option<String>,
    pub voice_api_key: Option<String>,
    pub follow_up_seed: Option<u64>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            max_session_questions: get_env_parse("MAX_SESSION_QUESTIONS")?,
            voice_api_url: env::var("VOICE_API_URL").ok(),
            voice_api_key: env::var("VOICE_API_KEY").ok(),
            follow_up_seed: match env::var("FOLLOW_UP_SEED") {
                Ok(raw) => Some(raw.parse().map_err(|e| {
                    Error::Config(format!("Invalid value for FOLLOW_UP_SEED: {}", e))
                })?),
                Err(_) => None,
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
