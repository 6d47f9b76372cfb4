//! Domain types for the Know Your Fan intake flow.
//!
//! Holds the Input Collector ([`FanForm`]), CPF handling, the closed set of
//! fan interests, the display board that enrichment results land on, and
//! environment-driven configuration. Nothing in this crate touches the
//! network.

pub mod app_config;
pub mod board;
pub mod config;
pub mod cpf;
pub mod document;
pub mod error;
pub mod form;
pub mod interests;
pub mod profile;

pub use app_config::{AppConfig, Environment, OverlapPolicy};
pub use board::{
    AttemptId, AttemptPhase, Banner, BoardView, CommunityFeedSnapshot, DisplayBoard, Enrichment,
    FollowerCount, SocialProfileSnapshot, FEED_LOAD_ERROR, SOCIAL_LOAD_ERROR,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use cpf::{mask_cpf, strip_non_digits, Cpf, CPF_LEN};
pub use document::{mime_for_file_name, DocumentImage};
pub use error::{ConfigError, CoreError};
pub use form::{FanForm, FormField};
pub use interests::{interests_json, Interest, InterestSet};
pub use profile::{normalize_handle, FanProfile};
