use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

const DEFAULT_SCRAPE_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub hh_api_base_url: String,
    pub hh_site_base_url: String,
    pub api_user_agent: String,
    pub scrape_user_agent: String,
    pub http_timeout_secs: u64,
    pub employer_timeout_secs: u64,
    pub enrich_concurrency: usize,
    pub shifts_per_month: f64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            hh_api_base_url: get_env_or("HH_API_BASE_URL", "https://api.hh.ru"),
            hh_site_base_url: get_env_or("HH_SITE_BASE_URL", "https://hh.ru"),
            api_user_agent: get_env_or("HH_API_USER_AGENT", "job-analytics-bot/1.0"),
            scrape_user_agent: get_env_or("HH_SCRAPE_USER_AGENT", DEFAULT_SCRAPE_USER_AGENT),
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 20)?,
            employer_timeout_secs: get_env_parse_or("EMPLOYER_TIMEOUT_SECS", 15)?,
            enrich_concurrency: get_env_parse_or(
                "ENRICH_CONCURRENCY",
                crate::services::enrichment_service::MAX_CONCURRENT_ENRICHMENTS,
            )?,
            shifts_per_month: get_env_parse_or(
                "SHIFTS_PER_MONTH",
                crate::services::salary_service::DEFAULT_SHIFTS_PER_MONTH,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8000".to_string(),
            hh_api_base_url: "https://api.hh.ru".to_string(),
            hh_site_base_url: "https://hh.ru".to_string(),
            api_user_agent: "job-analytics-bot/1.0".to_string(),
            scrape_user_agent: DEFAULT_SCRAPE_USER_AGENT.to_string(),
            http_timeout_secs: 20,
            employer_timeout_secs: 15,
            enrich_concurrency: crate::services::enrichment_service::MAX_CONCURRENT_ENRICHMENTS,
            shifts_per_month: crate::services::salary_service::DEFAULT_SHIFTS_PER_MONTH,
        }
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
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
