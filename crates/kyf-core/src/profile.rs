use serde::Serialize;

use crate::cpf::Cpf;
use crate::document::DocumentImage;
use crate::interests::Interest;

/// A validated fan submission, built fresh for every submit attempt.
#[derive(Debug, Clone, Serialize)]
pub struct FanProfile {
    pub name: String,
    pub email: String,
    pub cpf: Cpf,
    pub address: Option<String>,
    pub activities: Option<String>,
    /// Handle exactly as typed, with or without the leading `@`.
    pub twitter_handle: Option<String>,
    pub interests: Vec<Interest>,
    #[serde(skip)]
    pub document_image: Option<DocumentImage>,
}

impl FanProfile {
    /// The social handle used for the profile lookup, if one was given.
    #[must_use]
    pub fn social_handle(&self) -> Option<&str> {
        self.twitter_handle
            .as_deref()
            .map(normalize_handle)
            .filter(|h| !h.is_empty())
    }
}

/// Trims whitespace and strips a single leading `@`.
#[must_use]
pub fn normalize_handle(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}
