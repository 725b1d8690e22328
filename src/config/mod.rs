//! Application configuration.
//!
//! Loaded once at startup from `config.toml` with environment-variable
//! overrides (prefix `LM`, separator `__`), e.g. `LM__SERVER__PORT=9999`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub billing: BillingConfig,
    #[serde(default)]
    pub crm: CrmConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
}

impl AppConfig {
    /// Load configuration. Priority: ENV > config.toml > defaults.
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("LM")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<AppConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// Render a commented-out starting point for `config.toml`.
    pub fn generate_sample_config() -> String {
        let sample = Self::default();
        toml::to_string_pretty(&sample)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// External scoring-model endpoint (chat-completions shaped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_scoring_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_scoring_model")]
    pub model: String,
    #[serde(default = "default_outbound_timeout")]
    pub timeout_secs: u64,
}

/// Payment-processor session endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default = "default_billing_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_outbound_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    #[serde(default = "default_hubspot_url")]
    pub hubspot_url: String,
    #[serde(default = "default_salesforce_url")]
    pub salesforce_url: String,
    #[serde(default = "default_outbound_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_slug_length")]
    pub slug_length: usize,
    #[serde(default = "default_slug_attempts")]
    pub max_slug_attempts: usize,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_scoring_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_scoring_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_outbound_timeout() -> u64 {
    10
}

fn default_billing_base_url() -> String {
    "https://payments.luxmeet.app/api".to_string()
}

fn default_hubspot_url() -> String {
    "https://api.hubapi.com/crm/v3/objects/contacts".to_string()
}

fn default_salesforce_url() -> String {
    "https://login.salesforce.com/services/data/v59.0/sobjects/Lead".to_string()
}

fn default_slug_length() -> usize {
    8
}

fn default_slug_attempts() -> usize {
    5
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            api_url: default_scoring_api_url(),
            api_key: String::new(),
            model: default_scoring_model(),
            timeout_secs: default_outbound_timeout(),
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            base_url: default_billing_base_url(),
            api_key: String::new(),
            timeout_secs: default_outbound_timeout(),
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            hubspot_url: default_hubspot_url(),
            salesforce_url: default_salesforce_url(),
            timeout_secs: default_outbound_timeout(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            slug_length: default_slug_length(),
            max_slug_attempts: default_slug_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.features.slug_length, 8);
        assert_eq!(config.scoring.timeout_secs, 10);
        assert_eq!(config.crm.timeout_secs, 10);
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = AppConfig::generate_sample_config();
        let parsed: AppConfig = toml::from_str(&sample).expect("sample config should parse");
        assert_eq!(parsed.server.port, AppConfig::default().server.port);
    }
}
