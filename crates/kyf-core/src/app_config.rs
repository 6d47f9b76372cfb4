#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `KYF_LOG_LEVEL` is not set.
    #[must_use]
    pub fn default_log_level(self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What to do when a submit starts while the previous one is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Start the new attempt; late results from the old one are discarded.
    #[default]
    Supersede,
    /// Refuse the new attempt until the running one settles.
    Reject,
}

impl std::fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapPolicy::Supersede => write!(f, "supersede"),
            OverlapPolicy::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the intake backend, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub overlap_policy: OverlapPolicy,
}
