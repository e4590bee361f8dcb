use core_config::{env_or_default, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub server_url: String,
    pub environment: Environment,
}

/// The gateway listens on 8080 by default; the server takes 9090.
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SERVER_URL: &str = "http://localhost:9090";

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;
        let server_url = env_or_default("SHAREHUB_SERVER_URL", DEFAULT_SERVER_URL);

        Ok(Self {
            server,
            server_url,
            environment,
        })
    }
}
