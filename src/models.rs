use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Contact form submission
#[derive(Deserialize, Clone)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactRequest {
    // All three fields required and non-empty, otherwise the submission
    // is rejected before any email goes out
    pub fn into_fields(self) -> Option<(String, String, String)> {
        match (self.name, self.email, self.message) {
            (Some(name), Some(email), Some(message))
                if !name.is_empty() && !email.is_empty() && !message.is_empty() =>
            {
                Some((name, email, message))
            }
            _ => None,
        }
    }
}

// Latest public commit, as the live-activity widget consumes it
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GithubActivity {
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// Activity endpoint envelope
#[derive(Serialize)]
pub struct ActivityResponse {
    pub data: ActivityData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, String>>,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: String,
}

// "github" is always present, null when the fetch produced nothing
#[derive(Serialize)]
pub struct ActivityData {
    pub github: Option<GithubActivity>,
}

// Email provider response - the dispatched message id
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EmailId {
    pub id: String,
}
