//! CPF (Cadastro de Pessoas Físicas) normalization, masking, and validation.
//!
//! Masking only shapes what the user sees while typing. Validation always
//! re-derives the bare digits from whatever text it is handed, so separators
//! left behind by the mask never influence the outcome.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Removes every character that is not an ASCII digit.
#[must_use]
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Renders raw input as a (possibly partial) `XXX.XXX.XXX-XX` mask.
///
/// Input is stripped to digits and truncated to eleven. A separator is only
/// emitted once a digit follows it, so five digits render as `XXX.XX`.
#[must_use]
pub fn mask_cpf(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(CPF_LEN)
        .collect();

    let mut masked = String::with_capacity(CPF_LEN + 3);
    for (idx, digit) in digits.iter().enumerate() {
        match idx {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(*digit);
    }
    masked
}

/// A CPF holding exactly eleven unformatted digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Strips non-digits from `raw` and accepts the result only if exactly
    /// eleven digits remain.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCpf`] carrying the stripped digit count
    /// when it is not eleven.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let digits = strip_non_digits(raw);
        if digits.len() != CPF_LEN {
            return Err(CoreError::InvalidCpf {
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    /// The eleven bare digits, as sent to the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_cpf(&self.0))
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
