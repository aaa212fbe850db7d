use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_db: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            mongodb_uri: env::var("MONGODB_URI").context("MONGODB_URI not set")?,
            mongodb_db: env::var("MONGODB_DB").unwrap_or_else(|_| "foodiehub".to_string()),
        })
    }
}
