//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `SPLASHANNO_*` environment variables, then plain `PORT`.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ADMIN_PAGE, DEFAULT_CONFIG_FILE, DEFAULT_DATA_FILE, DEFAULT_HOST,
    DEFAULT_IMAGE_PREFIX, DEFAULT_PORT, ENV_PREFIX,
};
use crate::error::{StoreError, StoreResult};
use crate::filter::FilterMode;

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_host() -> IpAddr {
    DEFAULT_HOST.parse().unwrap_or(IpAddr::from([0, 0, 0, 0]))
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_admin_page() -> PathBuf {
    PathBuf::from(DEFAULT_ADMIN_PAGE)
}

fn default_image_prefix() -> String {
    DEFAULT_IMAGE_PREFIX.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// The JSON document served by `/data` and replaced by `/update-data`.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_admin_page")]
    pub admin_page: PathBuf,

    #[serde(default)]
    pub filter_mode: FilterMode,

    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,

    /// Reject writes whose shape the active filter mode cannot read.
    #[serde(default)]
    pub validate_writes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
            data_file: default_data_file(),
            admin_page: default_admin_page(),
            filter_mode: FilterMode::default(),
            image_prefix: default_image_prefix(),
            validate_writes: false,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> StoreResult<Self> {
        Self::load_from(std::env::vars().collect())
    }

    /// Load using `env` in place of the process environment.
    pub fn load_from(env: HashMap<String, String>) -> StoreResult<Self> {
        let config_file = env
            .get(&format!("{ENV_PREFIX}_CONFIG"))
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let port = env.get("PORT").cloned();

        Config::builder()
            .add_source(File::new(&config_file, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .set_override_option("port", port)
            .map_err(|e| StoreError::Config(e.to_string()))?
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StoreError::Config(e.to_string()))
    }
}
