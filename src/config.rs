use crate::error::{H262Error, Result};
use lazy_static::lazy_static;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

/// Initial capacity of the codec-specific data buffer.
pub const DEFAULT_CSD_CAPACITY: usize = 128;

/// Chunk size used when feeding a reader from a file.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const CONFIG_PATHS: [&str; 2] = ["./h262io.toml", "./h262io_config.toml"];

lazy_static! {
    static ref CONFIG: RwLock<ReaderConfig> = RwLock::new(ReaderConfig::load_or_default());
}

/// Tunables for [`H262Reader`](crate::codec::h262::H262Reader) and the file driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Bytes preallocated for the sequence header payload.
    pub csd_initial_capacity: usize,
    /// Bytes handed to the reader per `consume` call by the file driver.
    pub chunk_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            csd_initial_capacity: DEFAULT_CSD_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ReaderConfig {
    /// Builds a config from defaults, then environment variables, then the
    /// first config file found in the working directory.
    pub fn load() -> Result<Self> {
        let mut config = ReaderConfig::default();

        if let Ok(value) = env::var("H262IO_CSD_CAPACITY") {
            config.set("csd_initial_capacity", &value)?;
        }
        if let Ok(value) = env::var("H262IO_CHUNK_SIZE") {
            config.set("chunk_size", &value)?;
        }

        for path in &CONFIG_PATHS {
            if let Ok(content) = fs::read_to_string(path) {
                config.apply_str(&content)?;
                break;
            }
        }

        Ok(config)
    }

    fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("falling back to default reader config: {}", e);
                Self::default()
            }
        }
    }

    /// Applies `key = value` lines on top of this config. Unknown keys,
    /// blank lines and `#` comments are ignored.
    pub fn apply_str(&mut self, content: &str) -> Result<()> {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                self.set(key.trim(), value)?;
            }
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "csd_initial_capacity" => self.csd_initial_capacity = parse_size(key, value)?,
            "chunk_size" => self.chunk_size = parse_size(key, value)?,
            _ => log::debug!("ignoring unknown config key {}", key),
        }
        Ok(())
    }

    /// Re-reads the environment and config files into the global config.
    pub fn reload() {
        let new_config = ReaderConfig::load_or_default();
        if let Ok(mut config) = CONFIG.write() {
            *config = new_config;
        }
    }
}

fn parse_size(key: &str, value: &str) -> Result<usize> {
    let size: usize = value.trim().parse()?;
    if size == 0 {
        return Err(H262Error::Config(format!("{} must be greater than zero", key)));
    }
    Ok(size)
}

/// Returns a snapshot of the global reader config.
pub fn get_reader_config() -> ReaderConfig {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Creates a default config template file if it doesn't exist
pub fn create_default_config_template<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    if !path.as_ref().exists() {
        let template = r#"# h262io configuration

# Initial size of the sequence header buffer
csd_initial_capacity = 128

# Bytes per chunk when reading elementary stream files
chunk_size = 4096
"#;
        fs::write(path, template)?;
    }
    Ok(())
}
