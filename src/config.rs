use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::Path;

use crate::envprobe::Config;

/// Environment variable configuration loader
/// Every setting falls back to the default from `Config::default`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from environment variables with fallback defaults
    pub fn load() -> Result<Config> {
        let defaults = Config::default();

        let address = env::var("ENVPROBE_ADDRESS").unwrap_or(defaults.address);
        let port = env::var("ENVPROBE_PORT").unwrap_or(defaults.port);
        let log_level = env::var("ENVPROBE_LOG_LEVEL").unwrap_or(defaults.log_level);
        let key_variable = env::var("ENVPROBE_KEY_VARIABLE").unwrap_or(defaults.key_variable);
        let origin_variable =
            env::var("ENVPROBE_ORIGIN_VARIABLE").unwrap_or(defaults.origin_variable);
        let deployment_variable =
            env::var("ENVPROBE_DEPLOYMENT_VARIABLE").unwrap_or(defaults.deployment_variable);

        let exposed_prefixes = match env::var("ENVPROBE_EXPOSED_PREFIXES") {
            Ok(raw) => Self::parse_prefixes(&raw),
            Err(_) => defaults.exposed_prefixes,
        };

        Ok(Config {
            address,
            port,
            log_level,
            key_variable,
            origin_variable,
            deployment_variable,
            exposed_prefixes,
        })
    }

    /// Load configuration from a TOML file; absent keys take their defaults
    pub async fn load_file(path: &Path) -> Result<Config> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        toml::from_str(&raw)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))
    }

    /// Comma-separated list, blanks dropped
    fn parse_prefixes(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Print configuration help
    pub fn print_help() {
        println!("envprobe Configuration - Environment Variables");
        println!("==============================================");
        println!();
        println!("Server:");
        println!("  ENVPROBE_ADDRESS             Bind address (default: 0.0.0.0)");
        println!("  ENVPROBE_PORT                Server port (default: 8080)");
        println!("  ENVPROBE_LOG_LEVEL           Log level (default: info)");
        println!();
        println!("Probed variables:");
        println!("  ENVPROBE_KEY_VARIABLE        Secret reported by /debug_env (default: NEWS_API_KEY)");
        println!("  ENVPROBE_ORIGIN_VARIABLE     Source of Access-Control-Allow-Origin (default: ALLOWED_ORIGIN)");
        println!("  ENVPROBE_DEPLOYMENT_VARIABLE Deployment name for /debug_info (default: DEPLOYMENT_ENV)");
        println!("  ENVPROBE_EXPOSED_PREFIXES    Comma-separated prefixes listed by /debug_info (default: PUBLIC_)");
        println!();
        println!("The probed variables are read on every request, never at startup.");
        println!();
        println!("Example:");
        println!("  export NEWS_API_KEY=\"...\"");
        println!("  export ALLOWED_ORIGIN=\"https://app.example.com\"");
        println!("  envprobe");
    }

    /// Validate loaded configuration
    pub fn validate(config: &Config) -> Result<()> {
        // Validate port is a valid number
        config
            .port
            .parse::<u16>()
            .map_err(|_| anyhow!("Invalid port number: {}", config.port))?;

        // Validate log level
        match config.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    config.log_level
                ))
            }
        }

        for (name, value) in [
            ("key_variable", &config.key_variable),
            ("origin_variable", &config.origin_variable),
            ("deployment_variable", &config.deployment_variable),
        ] {
            if value.is_empty() {
                return Err(anyhow!("{} must not be empty", name));
            }
        }

        // An empty prefix would expose every variable
        if config.exposed_prefixes.iter().any(|p| p.is_empty()) {
            return Err(anyhow!("exposed_prefixes must not contain an empty prefix"));
        }

        Ok(())
    }
}
