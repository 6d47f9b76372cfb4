//! The closed set of fan interests offered by the intake form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the fixed interest options. No other keys can enter a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interest {
    #[serde(rename = "CS:GO")]
    CsGo,
    #[serde(rename = "FURIA")]
    Furia,
    #[serde(rename = "Eventos presenciais")]
    EventosPresenciais,
}

impl Interest {
    /// Every option, in the order the form lists them.
    pub const ALL: [Interest; 3] = [Interest::CsGo, Interest::Furia, Interest::EventosPresenciais];

    /// The label shown to users and sent to the backend.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Interest::CsGo => "CS:GO",
            Interest::Furia => "FURIA",
            Interest::EventosPresenciais => "Eventos presenciais",
        }
    }

    /// Command-line friendly key.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Interest::CsGo => "cs-go",
            Interest::Furia => "furia",
            Interest::EventosPresenciais => "eventos-presenciais",
        }
    }

    fn index(self) -> usize {
        match self {
            Interest::CsGo => 0,
            Interest::Furia => 1,
            Interest::EventosPresenciais => 2,
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interest {
    type Err = CoreError;

    /// Accepts either the label (case-insensitive) or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Interest::ALL
            .into_iter()
            .find(|i| i.label().eq_ignore_ascii_case(trimmed) || i.slug() == trimmed)
            .ok_or_else(|| CoreError::UnknownInterest(trimmed.to_string()))
    }
}

/// Boolean membership for each [`Interest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterestSet {
    flags: [bool; 3],
}

impl InterestSet {
    /// Flips the flag for `interest` and returns its new value.
    pub fn toggle(&mut self, interest: Interest) -> bool {
        let flag = &mut self.flags[interest.index()];
        *flag = !*flag;
        *flag
    }

    #[must_use]
    pub fn is_set(&self, interest: Interest) -> bool {
        self.flags[interest.index()]
    }

    /// The interests currently switched on, in form order.
    #[must_use]
    pub fn selected(&self) -> Vec<Interest> {
        Interest::ALL
            .into_iter()
            .filter(|i| self.is_set(*i))
            .collect()
    }
}

/// Encodes interests as the JSON array string the backend expects in the
/// `interests` multipart field.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails, which cannot happen
/// for this closed set in practice.
pub fn interests_json(interests: &[Interest]) -> Result<String, serde_json::Error> {
    serde_json::to_string(interests)
}
