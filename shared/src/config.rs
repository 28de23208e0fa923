// shared/src/config.rs

use tracing::info;

/// Client configuration resolved from the process environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Name of the host binding that holds the namespace handle
    pub binding: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binding: Self::DEFAULT_BINDING.to_string(),
        }
    }
}

impl Config {
    const DEFAULT_BINDING: &str = "KV";

    pub const BINDING_VAR: &str = "KV_NAMESPACE_BINDING";

    /// Load `.env` (if any) and then read the configuration from the environment
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment variables from {}", path.display()),
            Err(_) => info!("No .env file found, using system environment variables"),
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let binding = lookup(Self::BINDING_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                info!(
                    "{} not set, using binding '{}'",
                    Self::BINDING_VAR,
                    Self::DEFAULT_BINDING
                );
                Self::DEFAULT_BINDING.to_string()
            });

        Self { binding }
    }
}
