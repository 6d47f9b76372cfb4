//! Wire shapes for the intake backend's JSON responses.

use kyf_core::{CommunityFeedSnapshot, FollowerCount, SocialProfileSnapshot};
use serde::Deserialize;

/// Body of a successful `POST /submit`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of a non-2xx response. Either key may carry the explanation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    /// A string for handled errors; a list of objects for request
    /// validation failures.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// `error` first, then `detail`, ignoring blank values.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let from_error = self.error.as_deref().filter(|s| !s.trim().is_empty());
        if let Some(error) = from_error {
            return Some(error.to_string());
        }
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Body of `GET /twitter/{handle}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterProfileResponse {
    pub profile: TwitterProfile,
    #[serde(default)]
    pub recent_tweets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterProfile {
    pub name: String,
    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub followers_count: Option<u64>,
}

impl From<TwitterProfileResponse> for SocialProfileSnapshot {
    fn from(response: TwitterProfileResponse) -> Self {
        let follower_count = response
            .profile
            .public_metrics
            .and_then(|m| m.followers_count)
            .map_or(FollowerCount::Unavailable, FollowerCount::Count);
        SocialProfileSnapshot {
            display_name: response.profile.name,
            follower_count,
            recent_posts: response.recent_tweets,
        }
    }
}

/// Body of `GET /twitter/furia`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub recent_tweets: Option<Vec<String>>,
}

impl From<FeedResponse> for CommunityFeedSnapshot {
    fn from(response: FeedResponse) -> Self {
        CommunityFeedSnapshot {
            recent_posts: response.recent_tweets.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_error_over_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Interesses inválidos","detail":"x"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Interesses inválidos"));
    }

    #[test]
    fn error_body_falls_back_to_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"bad data"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("bad data"));
    }

    #[test]
    fn error_body_renders_structured_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","cpf"],"msg":"field required"}]}"#)
                .unwrap();
        let message = body.message().unwrap();
        assert!(message.contains("field required"), "got: {message}");
    }

    #[test]
    fn error_body_without_keys_has_no_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"  ","detail":null}"#).unwrap();
        assert!(body.message().is_none());
    }

    #[test]
    fn twitter_profile_maps_to_snapshot() {
        let response: TwitterProfileResponse = serde_json::from_value(serde_json::json!({
            "profile": {"name": "team", "public_metrics": {"followers_count": 42, "tweet_count": 7}},
            "recent_tweets": ["one", "two"]
        }))
        .unwrap();
        let snap = SocialProfileSnapshot::from(response);
        assert_eq!(snap.display_name, "team");
        assert_eq!(snap.follower_count, FollowerCount::Count(42));
        assert_eq!(snap.recent_posts, vec!["one", "two"]);
    }

    #[test]
    fn twitter_profile_without_metrics_is_unavailable() {
        let response: TwitterProfileResponse =
            serde_json::from_value(serde_json::json!({"profile": {"name": "team"}})).unwrap();
        let snap = SocialProfileSnapshot::from(response);
        assert_eq!(snap.follower_count, FollowerCount::Unavailable);
        assert!(snap.recent_posts.is_empty());
    }

    #[test]
    fn feed_without_tweets_is_empty() {
        let response: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(CommunityFeedSnapshot::from(response).recent_posts.is_empty());
        let response: FeedResponse = serde_json::from_str(r#"{"recent_tweets":null}"#).unwrap();
        assert!(CommunityFeedSnapshot::from(response).recent_posts.is_empty());
    }
}
