mod config;

pub use config::{Config, DisplayConfig, ProviderConfig, QuizConfig};

use std::path::PathBuf;

/// Returns `~/.config/quizzical[-dev]/` based on QUIZZICAL_ENV.
///
/// Set QUIZZICAL_ENV=dev to use development data directory, or
/// QUIZZICAL_CONFIG_DIR to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("QUIZZICAL_CONFIG_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("QUIZZICAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("quizzical-dev")
            } else {
                base_dir.join("quizzical")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
