use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Text-generation collaborator endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ComposerConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key (never stored in config)
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models/generate"
                .to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "COMPOSER_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Simulated payment processor configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentConfig {
    /// Fixed settle delay for the simulated charge
    pub settle_delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 2000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "topup.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            enable_tracing: true,
            composer: ComposerConfig::default(),
            payment: PaymentConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
log_level: "debug"
log_dir: "./logs"
log_file: "test.log"
use_json: true
rotation: "hourly"
enable_tracing: false
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.use_json);
        // Defaulted sub-configs
        assert_eq!(config.payment.settle_delay_ms, 2000);
        assert_eq!(config.composer.api_key_env, "COMPOSER_API_KEY");
    }

    #[test]
    fn test_parse_payment_override() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "test.log"
use_json: false
rotation: "daily"
enable_tracing: true
payment:
  settle_delay_ms: 50
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.payment.settle_delay_ms, 50);
    }
}
