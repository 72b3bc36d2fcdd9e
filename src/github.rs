use crate::models::GithubActivity;
use serde::Deserialize;
use std::time::Duration;

// GitHub events API - one public event
#[derive(Deserialize)]
struct GithubEvent {
    #[serde(rename = "type")]
    kind: String,
    repo: EventRepo,
    #[serde(default)]
    payload: EventPayload,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct EventRepo {
    name: String,
}

#[derive(Deserialize, Default)]
struct EventPayload {
    #[serde(rename = "ref", default)]
    git_ref: Option<String>,
    #[serde(default)]
    commits: Vec<EventCommit>,
}

#[derive(Deserialize)]
struct EventCommit {
    sha: String,
    message: String,
}

// Latest public commit for the user, None when the feed has no pushes
pub async fn fetch_latest_activity(
    client: &reqwest::Client,
    api_url: &str,
    user: &str,
) -> Result<Option<GithubActivity>, String> {
    let url = format!("{}/users/{}/events/public?per_page=10", api_url, user);

    let result = client
        .get(&url)
        .header("User-Agent", "portfolio-api")
        .header("Accept", "application/vnd.github+json")
        .timeout(Duration::from_secs(10))
        .send()
        .await;

    let events = match result {
        Ok(res) if res.status().is_success() => res
            .json::<Vec<GithubEvent>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?,
        Ok(res) => return Err(format!("GitHub returned {}", res.status())),
        Err(e) => return Err(format!("Request failed: {}", e)),
    };

    Ok(latest_push(&events))
}

// Events arrive newest first; the newest commit of a push is the last in
// its commits list
fn latest_push(events: &[GithubEvent]) -> Option<GithubActivity> {
    events
        .iter()
        .filter(|event| event.kind == "PushEvent")
        .find_map(|event| {
            let commit = event.payload.commits.last()?;
            Some(GithubActivity {
                repo: event.repo.name.clone(),
                branch: event
                    .payload
                    .git_ref
                    .as_deref()
                    .and_then(|r| r.strip_prefix("refs/heads/"))
                    .map(str::to_string),
                message: Some(
                    commit
                        .message
                        .lines()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                ),
                timestamp: event.created_at.clone(),
                url: Some(format!(
                    "https://github.com/{}/commit/{}",
                    event.repo.name, commit.sha
                )),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(json: &str) -> Vec<GithubEvent> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn picks_first_push_event_and_newest_commit() {
        let feed = events(
            r#"[
                {"type": "WatchEvent", "repo": {"name": "bry-ly/portfolio"}, "payload": {}},
                {
                    "type": "PushEvent",
                    "repo": {"name": "bry-ly/portfolio"},
                    "created_at": "2025-01-02T03:04:05Z",
                    "payload": {
                        "ref": "refs/heads/main",
                        "commits": [
                            {"sha": "aaa111", "message": "older commit"},
                            {"sha": "bbb222", "message": "fix contact form\n\ndetails here"}
                        ]
                    }
                },
                {
                    "type": "PushEvent",
                    "repo": {"name": "bry-ly/other"},
                    "payload": {"ref": "refs/heads/dev", "commits": [{"sha": "ccc", "message": "x"}]}
                }
            ]"#,
        );

        let activity = latest_push(&feed).unwrap();
        assert_eq!(activity.repo, "bry-ly/portfolio");
        assert_eq!(activity.branch.as_deref(), Some("main"));
        assert_eq!(activity.message.as_deref(), Some("fix contact form"));
        assert_eq!(activity.timestamp.as_deref(), Some("2025-01-02T03:04:05Z"));
        assert_eq!(
            activity.url.as_deref(),
            Some("https://github.com/bry-ly/portfolio/commit/bbb222")
        );
    }

    #[test]
    fn skips_pushes_without_commits() {
        let feed = events(
            r#"[
                {"type": "PushEvent", "repo": {"name": "bry-ly/empty"}, "payload": {"commits": []}},
                {
                    "type": "PushEvent",
                    "repo": {"name": "bry-ly/real"},
                    "payload": {"ref": "refs/tags/v1", "commits": [{"sha": "ddd", "message": "tagged"}]}
                }
            ]"#,
        );

        let activity = latest_push(&feed).unwrap();
        assert_eq!(activity.repo, "bry-ly/real");
        // tag pushes carry a ref that is not a branch
        assert!(activity.branch.is_none());
    }

    #[test]
    fn empty_feed_yields_none() {
        assert!(latest_push(&events("[]")).is_none());
        let feed = events(r#"[{"type": "ForkEvent", "repo": {"name": "a/b"}, "payload": {}}]"#);
        assert!(latest_push(&feed).is_none());
    }
}
