//! Submission orchestration.
//!
//! One attempt runs strictly in order:
//!
//! 1. `POST /submit`. Failure here is the only fatal path: the banner shows
//!    the failure and nothing else is requested.
//! 2. `GET /twitter/{handle}`, only when the fan gave a handle. Failure is
//!    replaced by a placeholder snapshot.
//! 3. `GET /twitter/furia`, always after a successful write. Failure is
//!    replaced by a placeholder feed.
//! 4. Success banner with the server's message.
//!
//! Every attempt starts by clearing the board, before the write goes out.

use std::sync::Arc;

use kyf_core::{
    AppConfig, AttemptId, AttemptPhase, Banner, CommunityFeedSnapshot, DisplayBoard, Enrichment,
    FanProfile, OverlapPolicy, SocialProfileSnapshot,
};
use thiserror::Error;

use crate::client::FanApiClient;
use crate::error::ClientError;

/// Shown when the write succeeds without a `message` in the response.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Dados enviados!";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The write step failed; `message` is what the user is shown.
    #[error("{message}")]
    Write {
        message: String,
        #[source]
        source: ClientError,
    },

    #[error("a submission is already in progress")]
    AttemptInFlight,
}

/// What one attempt produced.
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub attempt: AttemptId,
    pub message: String,
    /// `None` when no handle was given.
    pub social: Option<Enrichment<SocialProfileSnapshot>>,
    /// `None` only when a newer attempt superseded this one first.
    pub feed: Option<Enrichment<CommunityFeedSnapshot>>,
    /// A newer attempt took over the board before this one finished; its
    /// remaining reads were skipped and nothing more was displayed.
    pub superseded: bool,
}

/// Message for write failures where the backend never gave its own reason.
#[must_use]
pub fn connection_error_message(base_url: &str) -> String {
    format!(
        "Erro de conexão com o servidor. Verifique se o backend está rodando em {base_url}"
    )
}

/// Drives submit attempts against one backend and one display board.
#[derive(Debug, Clone)]
pub struct SubmissionOrchestrator {
    client: FanApiClient,
    board: Arc<DisplayBoard>,
    policy: OverlapPolicy,
}

impl SubmissionOrchestrator {
    #[must_use]
    pub fn new(client: FanApiClient, board: Arc<DisplayBoard>, policy: OverlapPolicy) -> Self {
        Self {
            client,
            board,
            policy,
        }
    }

    /// Builds the client from configuration and uses the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig, board: Arc<DisplayBoard>) -> Result<Self, ClientError> {
        Ok(Self::new(
            FanApiClient::new(config)?,
            board,
            config.overlap_policy,
        ))
    }

    #[must_use]
    pub fn board(&self) -> &Arc<DisplayBoard> {
        &self.board
    }

    /// Runs one full attempt for `profile`.
    ///
    /// Enrichment failures never surface here; they come back as
    /// [`Enrichment::Placeholder`] values in the report.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Write`] if the write request fails.
    /// - [`SubmitError::AttemptInFlight`] under [`OverlapPolicy::Reject`]
    ///   while another attempt is still running.
    pub async fn submit(&self, profile: FanProfile) -> Result<SubmissionReport, SubmitError> {
        let attempt = self.begin_attempt()?;
        tracing::info!(%attempt, has_handle = profile.social_handle().is_some(), "submission started");

        let response = match self.client.submit(&profile).await {
            Ok(response) => response,
            Err(err) => {
                let message = self.write_failure_message(&err);
                tracing::error!(%attempt, error = %err, "submission write failed");
                self.board
                    .set_banner(attempt, Banner::Failure(message.clone()));
                self.board.set_phase(attempt, AttemptPhase::Failed);
                return Err(SubmitError::Write {
                    message,
                    source: err,
                });
            }
        };

        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_owned());
        let mut report = SubmissionReport {
            attempt,
            message,
            social: None,
            feed: None,
            superseded: false,
        };

        if !self.advance(attempt, AttemptPhase::WriteOk) {
            report.superseded = true;
            return Ok(report);
        }

        if let Some(handle) = profile.social_handle() {
            if !self.advance(attempt, AttemptPhase::EnrichingSocial) {
                report.superseded = true;
                return Ok(report);
            }
            let raw_handle = profile.twitter_handle.as_deref().unwrap_or(handle);
            let social = self.enrich_social(handle, raw_handle).await;
            self.board.set_social(attempt, social.clone());
            report.social = Some(social);
        } else {
            tracing::debug!(%attempt, "no social handle; skipping profile read");
        }

        if !self.advance(attempt, AttemptPhase::EnrichingFeed) {
            report.superseded = true;
            return Ok(report);
        }
        let feed = self.enrich_feed().await;
        self.board.set_feed(attempt, feed.clone());
        report.feed = Some(feed);

        self.board
            .set_banner(attempt, Banner::Success(report.message.clone()));
        report.superseded = !self.advance(attempt, AttemptPhase::Done);
        tracing::info!(%attempt, superseded = report.superseded, "submission finished");
        Ok(report)
    }

    fn begin_attempt(&self) -> Result<AttemptId, SubmitError> {
        match self.policy {
            OverlapPolicy::Supersede => Ok(self.board.begin_attempt()),
            OverlapPolicy::Reject => self.board.try_begin_attempt().ok_or_else(|| {
                tracing::warn!("submission refused: previous attempt still in flight");
                SubmitError::AttemptInFlight
            }),
        }
    }

    fn advance(&self, attempt: AttemptId, phase: AttemptPhase) -> bool {
        let current = self.board.set_phase(attempt, phase);
        if current {
            tracing::debug!(%attempt, ?phase, "attempt advanced");
        } else {
            tracing::info!(%attempt, ?phase, "attempt superseded; stopping");
        }
        current
    }

    fn write_failure_message(&self, err: &ClientError) -> String {
        err.server_message().map_or_else(
            || connection_error_message(self.client.base_url()),
            str::to_owned,
        )
    }

    async fn enrich_social(
        &self,
        handle: &str,
        raw_handle: &str,
    ) -> Enrichment<SocialProfileSnapshot> {
        match self.client.fetch_social_profile(handle).await {
            Ok(snapshot) => Enrichment::Loaded(snapshot),
            Err(err) => {
                tracing::warn!(handle, error = %err, "social profile read failed; using placeholder");
                Enrichment::Placeholder {
                    value: SocialProfileSnapshot::placeholder(raw_handle),
                    cause: err.to_string(),
                }
            }
        }
    }

    async fn enrich_feed(&self) -> Enrichment<CommunityFeedSnapshot> {
        match self.client.fetch_community_feed().await {
            Ok(snapshot) => Enrichment::Loaded(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "community feed read failed; using placeholder");
                Enrichment::Placeholder {
                    value: CommunityFeedSnapshot::placeholder(),
                    cause: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_message_names_backend() {
        assert_eq!(
            connection_error_message("http://localhost:8000"),
            "Erro de conexão com o servidor. Verifique se o backend está rodando em http://localhost:8000"
        );
    }

    #[test]
    fn rejected_write_surfaces_server_text() {
        let client = FanApiClient::with_base_url("http://localhost:8000", 5, "kyf-test/0.1")
            .expect("client construction should not fail");
        let orchestrator =
            SubmissionOrchestrator::new(client, Arc::new(DisplayBoard::new()), OverlapPolicy::default());
        let err = ClientError::Rejected {
            endpoint: "/submit".to_owned(),
            status: 400,
            message: "bad data".to_owned(),
        };
        assert_eq!(orchestrator.write_failure_message(&err), "bad data");

        let err = ClientError::InvalidBaseUrl {
            base_url: "x".to_owned(),
            reason: "y".to_owned(),
        };
        assert!(orchestrator
            .write_failure_message(&err)
            .ends_with("http://localhost:8000"));
    }
}
