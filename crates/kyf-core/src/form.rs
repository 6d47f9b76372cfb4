//! The Input Collector: editable form state that yields a [`FanProfile`].

use std::str::FromStr;

use crate::cpf::{mask_cpf, Cpf};
use crate::document::DocumentImage;
use crate::error::CoreError;
use crate::interests::{Interest, InterestSet};
use crate::profile::FanProfile;

/// The free-text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Cpf,
    Address,
    Activities,
    Twitter,
}

impl FromStr for FormField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "email" => Ok(FormField::Email),
            "cpf" => Ok(FormField::Cpf),
            "address" => Ok(FormField::Address),
            "activities" => Ok(FormField::Activities),
            "twitter" => Ok(FormField::Twitter),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

/// In-progress form state.
///
/// Field updates are never validated; only [`FanForm::submit`] checks the
/// CPF. The CPF field holds the masked display text.
#[derive(Debug, Clone, Default)]
pub struct FanForm {
    name: String,
    email: String,
    cpf: String,
    address: String,
    activities: String,
    twitter: String,
    interests: InterestSet,
    file: Option<DocumentImage>,
}

impl FanForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Email => self.email = value.to_string(),
            FormField::Cpf => self.cpf = mask_cpf(value),
            FormField::Address => self.address = value.to_string(),
            FormField::Activities => self.activities = value.to_string(),
            FormField::Twitter => self.twitter = value.to_string(),
        }
    }

    /// Current display text of a field.
    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Cpf => &self.cpf,
            FormField::Address => &self.address,
            FormField::Activities => &self.activities,
            FormField::Twitter => &self.twitter,
        }
    }

    /// Flips one interest and returns whether it is now selected.
    pub fn toggle_interest(&mut self, interest: Interest) -> bool {
        self.interests.toggle(interest)
    }

    #[must_use]
    pub fn interests(&self) -> &InterestSet {
        &self.interests
    }

    /// Replaces any previously accepted file.
    pub fn accept_file(&mut self, document: DocumentImage) {
        if let Some(previous) = self.file.replace(document) {
            tracing::debug!(replaced = %previous.file_name, "document image replaced");
        }
    }

    /// Validates a dropped file and keeps it only if it is an image.
    ///
    /// A rejected file leaves the current selection untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedFileType`] for non-image files.
    pub fn accept_upload(
        &mut self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), CoreError> {
        let document = DocumentImage::new(file_name, mime_type, bytes)?;
        self.accept_file(document);
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    #[must_use]
    pub fn file(&self) -> Option<&DocumentImage> {
        self.file.as_ref()
    }

    /// Validates the CPF and builds the profile handed to the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCpf`] when the CPF does not reduce to
    /// exactly eleven digits. Nothing is built in that case.
    pub fn submit(&self) -> Result<FanProfile, CoreError> {
        let cpf = Cpf::parse(&self.cpf).inspect_err(|e| {
            tracing::warn!(error = %e, "submission blocked by CPF validation");
        })?;

        Ok(FanProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            cpf,
            address: non_blank(&self.address),
            activities: non_blank(&self.activities),
            twitter_handle: (!self.twitter.trim().is_empty()).then(|| self.twitter.clone()),
            interests: self.interests.selected(),
            document_image: self.file.clone(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
