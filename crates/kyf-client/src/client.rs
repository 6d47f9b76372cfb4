//! HTTP client for the Know Your Fan intake backend.
//!
//! Wraps `reqwest` with typed responses for the three endpoints the intake
//! flow consumes. Non-2xx answers surface as [`ClientError::Rejected`],
//! carrying the server's own `error`/`detail` text when it sent one.

use std::time::Duration;

use kyf_core::{interests_json, AppConfig, CommunityFeedSnapshot, FanProfile, SocialProfileSnapshot};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{ErrorBody, FeedResponse, SubmitResponse, TwitterProfileResponse};

const SUBMIT_PATH: &str = "submit";
const COMMUNITY_FEED_PATH: &str = "twitter/furia";

const SUBMIT_FAILED: &str = "Falha no envio";
const PROFILE_FAILED: &str = "Falha ao buscar dados do Twitter";
const FEED_FAILED: &str = "Falha ao buscar tweets da FURIA";

/// Characters left unescaped when a handle becomes a path segment.
const HANDLE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

/// Client for the intake backend.
///
/// Use [`FanApiClient::new`] with loaded configuration or
/// [`FanApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct FanApiClient {
    client: Client,
    base_url: Url,
}

impl FanApiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative joins append to the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// The backend root, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Sends the fan profile as a multipart `POST /submit`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] when no response arrives.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if a 2xx body is not the expected JSON.
    pub async fn submit(&self, profile: &FanProfile) -> Result<SubmitResponse, ClientError> {
        let url = self.endpoint(SUBMIT_PATH)?;
        let form = build_submit_form(profile)?;
        tracing::debug!(
            url = %url,
            interests = profile.interests.len(),
            has_file = profile.document_image.is_some(),
            "posting fan submission"
        );

        let response = self.client.post(url).multipart(form).send().await?;
        let response = ensure_success(response, SUBMIT_PATH, SUBMIT_FAILED).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(SubmitResponse::default());
        }
        let parsed: SubmitResponse = parse_json(&body, SUBMIT_PATH)?;
        tracing::debug!(status = ?parsed.status, "submission accepted");
        Ok(parsed)
    }

    /// Reads a fan's social profile. `handle` must already have its leading
    /// `@` removed.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] when no response arrives.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_social_profile(
        &self,
        handle: &str,
    ) -> Result<SocialProfileSnapshot, ClientError> {
        let path = format!("twitter/{}", utf8_percent_encode(handle, HANDLE_SEGMENT));
        let response: TwitterProfileResponse = self.get_json(&path, PROFILE_FAILED).await?;
        Ok(response.into())
    }

    /// Reads the fixed community feed.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] when no response arrives.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_community_feed(&self) -> Result<CommunityFeedSnapshot, ClientError> {
        let response: FeedResponse = self.get_json(COMMUNITY_FEED_PATH, FEED_FAILED).await?;
        Ok(response.into())
    }

    /// Probes the backend root and returns its `status` text, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] or [`ClientError::Rejected`] when the
    /// backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<Option<String>, ClientError> {
        let body: serde_json::Value = self.get_json("", "backend unavailable").await?;
        Ok(body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, path, fallback).await?;
        let body = response.text().await?;
        parse_json(&body, path)
    }
}

/// Encodes the profile as the multipart body `POST /submit` expects.
///
/// Optional text fields are omitted when absent; `interests` is always sent
/// as a JSON array string.
///
/// # Errors
///
/// Returns [`ClientError::Encode`] if interests cannot be serialized, or
/// [`ClientError::Http`] if the document MIME type is rejected by `reqwest`.
pub fn build_submit_form(profile: &FanProfile) -> Result<Form, ClientError> {
    let interests = interests_json(&profile.interests).map_err(|source| ClientError::Encode {
        field: "interests",
        source,
    })?;

    let mut form = Form::new()
        .text("name", profile.name.clone())
        .text("email", profile.email.clone())
        .text("cpf", profile.cpf.as_str().to_owned());

    if let Some(address) = &profile.address {
        form = form.text("address", address.clone());
    }
    if let Some(activities) = &profile.activities {
        form = form.text("activities", activities.clone());
    }
    form = form.text("interests", interests);
    if let Some(twitter) = &profile.twitter_handle {
        form = form.text("twitter", twitter.clone());
    }
    if let Some(document) = &profile.document_image {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&document.mime_type)?;
        form = form.part("file", part);
    }

    Ok(form)
}

/// Passes 2xx responses through; turns anything else into
/// [`ClientError::Rejected`] with the body's message or `fallback`.
async fn ensure_success(
    response: Response,
    endpoint: &str,
    fallback: &str,
) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // A body that is missing or not JSON still counts as a rejection.
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| fallback.to_owned());

    Err(ClientError::Rejected {
        endpoint: format!("/{endpoint}"),
        status: status.as_u16(),
        message,
    })
}

fn parse_json<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::Deserialize {
        context: format!("/{endpoint}"),
        source,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
