//! Error taxonomy
//!
//! Resource failures degrade a single entity or clip and are logged by the caller.
//! Configuration failures only happen at startup.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which backend a failed resource belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    Audio,
    Font,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Texture => "texture",
            ResourceKind::Audio => "audio",
            ResourceKind::Font => "font",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load {kind} `{}`: {reason}", path.display())]
    ResourceLoad {
        kind: ResourceKind,
        path: PathBuf,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to read settings file `{}`: {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}

impl GameError {
    pub fn resource(kind: ResourceKind, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        GameError::ResourceLoad {
            kind,
            path: path.into(),
            reason: reason.into(),
        }
    }
}
