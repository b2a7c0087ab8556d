//! Build-Time Configuration
//!
//! Values come from environment variables read at compile time, since the
//! bundle has no runtime environment.

use crate::router::Route;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: log::Level,
    pub default_route: Route,
    /// Receipt modal width used when the modal cannot be measured
    pub modal_width: u32,
    /// Employee email written to the session when none is stored
    pub seed_user_email: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            log_level: log::Level::Info,
            default_route: Route::Bills,
            modal_width: 800,
            seed_user_email: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("BILLED_ENVIRONMENT"),
            option_env!("BILLED_ENABLE_LOGGING"),
            option_env!("BILLED_LOG_LEVEL"),
            option_env!("BILLED_DEFAULT_ROUTE"),
            option_env!("BILLED_MODAL_WIDTH"),
            option_env!("BILLED_SEED_EMAIL"),
        )
    }

    /// Unset or unparseable values keep their defaults
    fn from_values(
        environment: Option<&str>,
        enable_logging: Option<&str>,
        log_level: Option<&str>,
        default_route: Option<&str>,
        modal_width: Option<&str>,
        seed_user_email: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.unwrap_or(defaults.environment.as_str()).to_string(),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: log_level
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
            default_route: default_route
                .and_then(|v| Route::from_path(v).or_else(|| Route::from_name(v)))
                .unwrap_or(defaults.default_route),
            modal_width: modal_width
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.modal_width),
            seed_user_email: seed_user_email
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string),
        }
    }
}
