//! Configuration management module
//!
//! Credential resolution (flag > environment > config file) and the
//! persisted config file.

pub mod file;
pub mod settings;

pub use file::ConfigFile;
pub use settings::Settings;
