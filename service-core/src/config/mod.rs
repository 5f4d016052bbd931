use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "dev".to_string()
}

impl Config {
    /// Load base settings.
    ///
    /// Sources in increasing priority: optional `configuration` file,
    /// `APP__*` variables, then the bare `PORT` and `ENVIRONMENT` variables
    /// most hosting platforms inject.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", non_empty_var("PORT"))?
            .set_override_option("environment", non_empty_var("ENVIRONMENT"))?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Production deployments run behind a managed platform.
    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_ascii_lowercase().as_str(),
            "production" | "prod"
        )
    }
}

/// Set-but-blank variables count as unset.
fn non_empty_var(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            environment: default_environment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standalone_on_3000() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(!config.is_production());
    }

    #[test]
    fn production_spellings_are_recognised() {
        for environment in ["production", "prod", "PRODUCTION"] {
            let config = Config {
                environment: environment.to_string(),
                ..Config::default()
            };
            assert!(config.is_production(), "{environment}");
        }

        let config = Config {
            environment: "staging".to_string(),
            ..Config::default()
        };
        assert!(!config.is_production());
    }

    #[test]
    fn blank_overrides_are_ignored() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("8080".to_string())), Some("8080".to_string()));
    }
}
