use std::path::{Path, PathBuf};

use augur_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Walkdir(#[from] walkdir::Error),

    /// The bundled-skills root exists but cannot be read (as opposed to missing).
    #[error("cannot read skills root {}: {source}", path.display())]
    RegistryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid SKILL.md frontmatter: {reason}")]
    InvalidFrontmatter { reason: String },

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn registry_unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::RegistryUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn invalid_frontmatter(reason: impl Into<String>) -> Self {
        Self::InvalidFrontmatter {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

augur_common::impl_context!();
