use core_config::server::ServerConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub environment: Environment,
}

/// The server listens on 9090 by default; the gateway takes 8080.
const DEFAULT_PORT: u16 = 9090;

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;

        Ok(Self {
            server,
            environment,
        })
    }
}
