// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3232;
const DEFAULT_DATA_PATH: &str = "data/geojson/fullDownload.json";
const DEFAULT_CENSUS_API_URL: &str = "https://api.census.gov/data";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Redlining GeoJSON document loaded at startup
    pub data_path: PathBuf,
    /// GCP project for the Firestore pin store. When unset, pins are kept
    /// in memory and lost on restart.
    pub gcp_project_id: Option<String>,
    /// Base URL of the Census data API
    pub census_api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            data_path: env::var("REDLINING_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            census_api_url: env::var("CENSUS_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_CENSUS_API_URL.to_string()),
        })
    }

    /// Config for tests: in-memory pins, unroutable Census URL.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from("tests/fixtures/redlining_sample.json"),
            gcp_project_id: None,
            census_api_url: "http://127.0.0.1:9".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "4000");
        env::set_var("REDLINING_DATA_PATH", "/tmp/redlining.json");
        env::set_var("CENSUS_API_URL", "http://localhost:8000/data/");
        env::remove_var("GCP_PROJECT_ID");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 4000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/redlining.json"));
        assert_eq!(config.census_api_url, "http://localhost:8000/data");
        assert!(config.gcp_project_id.is_none());

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PORT", _))
        ));
        env::remove_var("PORT");
    }
}
