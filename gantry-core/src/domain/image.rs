//! Container image references
//!
//! An image reference is a `repository:tag` pair. The parser is the only
//! constructor, so every `ImageRef` in the system is well-formed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised for image strings that are not `repository:tag`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The input is missing the `:` separator, has more than one, or has an
    /// empty repository or tag segment
    #[error("malformed image reference {0:?}: expected repository:tag")]
    Malformed(String),
}

/// A parsed `repository:tag` image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    repository: String,
    tag: String,
}

impl ImageRef {
    /// Parse a `repository:tag` string
    ///
    /// Fails unless the input contains exactly one `:` with non-empty
    /// segments on both sides.
    pub fn parse(input: &str) -> Result<Self, ImageError> {
        let mut parts = input.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(repository), Some(tag), None) if !repository.is_empty() && !tag.is_empty() => {
                Ok(Self {
                    repository: repository.to_string(),
                    tag: tag.to_string(),
                })
            }
            _ => Err(ImageError::Malformed(input.to_string())),
        }
    }

    /// The repository part, used to match containers in a task definition
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The tag part
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl FromStr for ImageRef {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
