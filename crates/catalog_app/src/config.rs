use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_core::DEFAULT_PAGE_SIZE;
use catalog_engine::{ClientSettings, DEFAULT_BASE_URL};
use catalog_logging::{catalog_info, catalog_warn, LogDestination};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "dashboard.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogOutput {
    #[default]
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub output_dir: PathBuf,
    pub log: LogOutput,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            output_dir: PathBuf::from("output"),
            log: LogOutput::File,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl DashboardConfig {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogOutput::File => LogDestination::File,
            LogOutput::Terminal => LogDestination::Terminal,
            LogOutput::Both => LogDestination::Both,
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        }
    }
}

/// Read `path`, falling back to defaults when it is missing or unreadable.
///
/// Runs before the logger exists, so problems are returned as a warning for
/// the caller to log once logging is up.
pub fn load_config(path: &Path) -> (DashboardConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (DashboardConfig::default(), None);
        }
        Err(err) => {
            return (
                DashboardConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str::<DashboardConfig>(&content) {
        Ok(mut config) => {
            let warning = (config.page_size == 0).then(|| {
                config.page_size = DEFAULT_PAGE_SIZE;
                format!("page_size 0 in {:?} replaced by {}", path, DEFAULT_PAGE_SIZE)
            });
            (config, warning)
        }
        Err(err) => (
            DashboardConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

pub fn report_config(config: &DashboardConfig, warning: Option<String>) {
    if let Some(warning) = warning {
        catalog_warn!("{warning}");
    }
    catalog_info!(
        "using catalog at {} with {} items per page, exports to {:?}",
        config.api_base_url,
        config.page_size,
        config.output_dir
    );
}
