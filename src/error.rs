use thiserror::Error;

use crate::content::ContentError;
use crate::typing::TypingError;

/// Reasons the page cannot start.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("portfolio content is invalid: {0}")]
    Content(#[from] ContentError),

    #[error("typing animation is misconfigured: {0}")]
    Typing(#[from] TypingError),

    #[error("missing #{0} mount point")]
    MissingMountPoint(&'static str),
}

impl SiteError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::Typing(_) => "typing",
            Self::MissingMountPoint(_) => "mount",
        }
    }
}
