use crate::config::ConfigError;
use fontbadge_loader::LoadError;
use thiserror::Error;

/// Badge errors
#[derive(Error, Debug)]
pub enum BadgeError {
    /// Render requested before any `setup_*_font` call
    #[error("no font source configured")]
    InvalidSource,

    #[error("font loading failed: {0}")]
    Load(LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<LoadError> for BadgeError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::InvalidSource => BadgeError::InvalidSource,
            other => BadgeError::Load(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, BadgeError>;
