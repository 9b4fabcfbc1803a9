//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir:
//!   Windows: %APPDATA%\waveman\
//!   macOS:   ~/Library/Application Support/waveman/
//!   Linux:   ~/.config/waveman/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `config.toml`.
    pub config_dir: PathBuf,
    /// Full path to the default `config.toml`.
    pub config_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "waveman";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);
        let config_file = config_dir.join("config.toml");

        Self {
            config_dir,
            config_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
