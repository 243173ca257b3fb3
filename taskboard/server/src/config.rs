use serde::Deserialize;

/// Runtime configuration, read from the process environment.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_listen_host")]
    pub listen_host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    /// Loads configuration from the given environment source.
    pub fn from_environment(environment: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder().add_source(environment).build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Returns the `host:port` pair the listener binds to.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.listen_host, self.port)
    }
}

fn default_listen_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    10
}
