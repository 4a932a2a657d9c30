//! Configuration handling for the intake TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the submit endpoint
pub const ENDPOINT_ENV: &str = "INTAKE_ONBOARD_URL";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default link that form state is mirrored into
const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:3000/onboarding";

/// One selectable service in the "Services Interested In" group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOption {
    /// Identifier sent on the wire and stored in the link
    pub value: String,
    pub label: String,
}

impl ServiceOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Built-in service catalogue used when the config file has none
pub fn default_services() -> Vec<ServiceOption> {
    vec![
        ServiceOption::new("web-development", "Web Development"),
        ServiceOption::new("mobile-development", "Mobile Development"),
        ServiceOption::new("ui-ux-design", "UI/UX Design"),
        ServiceOption::new("cloud-infrastructure", "Cloud Infrastructure"),
        ServiceOption::new("consulting", "Technical Consulting"),
    ]
}

/// User configuration for the intake TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Submit endpoint (overridden by `INTAKE_ONBOARD_URL`)
    pub endpoint: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Link that form state is mirrored into
    pub share_base_url: Option<String>,
    /// Selectable services
    pub services: Option<Vec<ServiceOption>>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "intake", "intake-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file in the platform data directory
    pub fn log_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "intake", "intake-tui")
            .map(|dirs| dirs.data_dir().join("intake-tui.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the endpoint: flag, then environment, then config file
    pub fn resolve_endpoint(&self, flag: Option<&str>, env: Option<&str>) -> Option<String> {
        [flag, env, self.endpoint.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|e| !e.is_empty())
            .map(str::to_string)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn share_base_url(&self) -> &str {
        self.share_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SHARE_BASE_URL)
    }

    pub fn services(&self) -> Vec<ServiceOption> {
        match &self.services {
            Some(services) if !services.is_empty() => services.clone(),
            _ => default_services(),
        }
    }
}
