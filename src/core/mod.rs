pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, load_config_from, KeeperConfig};
pub use error::{KeeperError, Result};
