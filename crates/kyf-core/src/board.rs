//! Display-side state for one page session.
//!
//! The board owns the submission banner and the two enrichment snapshots.
//! Every submit attempt starts by calling [`DisplayBoard::begin_attempt`],
//! which empties all three slots before any request goes out. Writes are
//! tagged with the [`AttemptId`] that produced them; writes from an attempt
//! that has since been superseded are dropped.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Single post shown when the fan's own profile could not be loaded.
pub const SOCIAL_LOAD_ERROR: &str = "Erro ao carregar tweets. Tente novamente mais tarde.";

/// Single post shown when the community feed could not be loaded.
pub const FEED_LOAD_ERROR: &str = "Erro ao carregar tweets da FURIA. Tente novamente mais tarde.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FollowerCount {
    Count(u64),
    Unavailable,
}

impl fmt::Display for FollowerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowerCount::Count(n) => write!(f, "{n}"),
            FollowerCount::Unavailable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialProfileSnapshot {
    pub display_name: String,
    pub follower_count: FollowerCount,
    pub recent_posts: Vec<String>,
}

impl SocialProfileSnapshot {
    /// Stand-in used when the profile read fails. Keeps the handle exactly as
    /// the fan typed it.
    #[must_use]
    pub fn placeholder(raw_handle: &str) -> Self {
        Self {
            display_name: raw_handle.to_string(),
            follower_count: FollowerCount::Unavailable,
            recent_posts: vec![SOCIAL_LOAD_ERROR.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommunityFeedSnapshot {
    pub recent_posts: Vec<String>,
}

impl CommunityFeedSnapshot {
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            recent_posts: vec![FEED_LOAD_ERROR.to_string()],
        }
    }
}

/// Outcome of one enrichment read.
///
/// `Placeholder` still carries a displayable value, but records that it was
/// synthesized because the read failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    Loaded(T),
    Placeholder { value: T, cause: String },
}

impl<T> Enrichment<T> {
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Enrichment::Loaded(value) | Enrichment::Placeholder { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Enrichment::Loaded(value) | Enrichment::Placeholder { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Enrichment::Placeholder { .. })
    }

    /// Why the read failed, for placeholders.
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        match self {
            Enrichment::Loaded(_) => None,
            Enrichment::Placeholder { cause, .. } => Some(cause),
        }
    }
}

/// Message shown to the user once an attempt settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Failure(String),
}

impl Banner {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Banner::Success(text) | Banner::Failure(text) => text,
        }
    }
}

/// Where a submit attempt currently is.
///
/// `Idle → Writing → {Failed | WriteOk}`, then
/// `WriteOk → EnrichingSocial (optional) → EnrichingFeed → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptPhase {
    #[default]
    Idle,
    Writing,
    Failed,
    WriteOk,
    EnrichingSocial,
    EnrichingFeed,
    Done,
}

impl AttemptPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptPhase::Failed | AttemptPhase::Done)
    }
}

/// Identifies one submit attempt on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A copy of everything the display currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub attempt: Option<AttemptId>,
    pub phase: AttemptPhase,
    pub banner: Option<Banner>,
    pub social: Option<Enrichment<SocialProfileSnapshot>>,
    pub feed: Option<Enrichment<CommunityFeedSnapshot>>,
}

impl BoardView {
    /// True when nothing from any attempt is on display.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.banner.is_none() && self.social.is_none() && self.feed.is_none()
    }
}

#[derive(Debug, Default)]
struct BoardState {
    next_attempt: u64,
    view: BoardView,
}

impl BoardState {
    fn is_current(&self, attempt: AttemptId) -> bool {
        self.view.attempt == Some(attempt)
    }

    fn in_flight(&self) -> bool {
        self.view.attempt.is_some() && !self.view.phase.is_terminal()
    }

    fn start_attempt(&mut self) -> AttemptId {
        self.next_attempt += 1;
        let attempt = AttemptId(self.next_attempt);
        if let Some(previous) = self.view.attempt.filter(|_| self.in_flight()) {
            tracing::debug!(%previous, %attempt, "superseding in-flight attempt");
        }
        self.view = BoardView {
            attempt: Some(attempt),
            phase: AttemptPhase::Writing,
            ..BoardView::default()
        };
        attempt
    }
}

/// Shared display state. Wrap in an `Arc` to hand to the orchestrator.
#[derive(Debug, Default)]
pub struct DisplayBoard {
    state: Mutex<BoardState>,
}

impl DisplayBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every update is a single assignment, so a poisoned guard holds no
    // partial state.
    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new attempt: clears banner and snapshots, enters `Writing`,
    /// and supersedes whatever attempt was current.
    pub fn begin_attempt(&self) -> AttemptId {
        self.lock().start_attempt()
    }

    /// Like [`DisplayBoard::begin_attempt`], but refuses while the current
    /// attempt has not reached a terminal phase.
    pub fn try_begin_attempt(&self) -> Option<AttemptId> {
        let mut state = self.lock();
        if state.in_flight() {
            return None;
        }
        Some(state.start_attempt())
    }

    #[must_use]
    pub fn is_current(&self, attempt: AttemptId) -> bool {
        self.lock().is_current(attempt)
    }

    /// Whether the current attempt is still running.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.lock().in_flight()
    }

    /// Moves the attempt to `phase`. Returns `false` if it was superseded.
    pub fn set_phase(&self, attempt: AttemptId, phase: AttemptPhase) -> bool {
        self.update(attempt, |view| view.phase = phase)
    }

    pub fn set_social(
        &self,
        attempt: AttemptId,
        social: Enrichment<SocialProfileSnapshot>,
    ) -> bool {
        self.update(attempt, |view| view.social = Some(social))
    }

    pub fn set_feed(&self, attempt: AttemptId, feed: Enrichment<CommunityFeedSnapshot>) -> bool {
        self.update(attempt, |view| view.feed = Some(feed))
    }

    pub fn set_banner(&self, attempt: AttemptId, banner: Banner) -> bool {
        self.update(attempt, |view| view.banner = Some(banner))
    }

    #[must_use]
    pub fn view(&self) -> BoardView {
        self.lock().view.clone()
    }

    fn update(&self, attempt: AttemptId, apply: impl FnOnce(&mut BoardView)) -> bool {
        let mut state = self.lock();
        if !state.is_current(attempt) {
            tracing::debug!(%attempt, "dropping update from superseded attempt");
            return false;
        }
        apply(&mut state.view);
        true
    }
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;
