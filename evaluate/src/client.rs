//! REST client collecting an [`ActivitySnapshot`] from the collaboration backend.

use crate::config::ApiConfig;
use chrono::{DateTime, Utc};
use model::{ActivitySnapshot, File, Member, Message, Post, Task};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend url `{0}`")]
    InvalidUrl(String, #[source] url::ParseError),
    #[error("request to {path} failed")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode {path} response")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Collections come back either bare or wrapped in `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TeamStructure {
    Members(Vec<Member>),
    Team { members: Vec<Member> },
}

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        // a trailing slash keeps the last path segment when joining
        let raw = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(config.base_url.clone(), e))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ClientError::Request {
                path: base_url.to_string(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn endpoint(&self, path: &str, idea_id: &str) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(path.to_owned(), e))?;
        url.query_pairs_mut().append_pair("ideaId", idea_id);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, idea_id: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path, idea_id)?;
        debug!(%url, "fetching");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| ClientError::Request {
                path: path.to_owned(),
                source,
            })?;
        response.json().await.map_err(|source| ClientError::Decode {
            path: path.to_owned(),
            source,
        })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        idea_id: &str,
    ) -> Result<Vec<T>, ClientError> {
        Ok(self.get::<Listing<T>>(path, idea_id).await?.into_vec())
    }

    pub async fn members(&self, idea_id: &str) -> Result<Vec<Member>, ClientError> {
        Ok(match self.get::<TeamStructure>("team-structure", idea_id).await? {
            TeamStructure::Members(members) | TeamStructure::Team { members } => members,
        })
    }

    /// Fetches the five collections concurrently and stamps the snapshot with `now`.
    pub async fn snapshot(
        &self,
        idea_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ActivitySnapshot, ClientError> {
        let (members, tasks, messages, posts, files) = tokio::try_join!(
            self.members(idea_id),
            self.list::<Task>("tasks", idea_id),
            self.list::<Message>("messages", idea_id),
            self.list::<Post>("posts", idea_id),
            self.list::<File>("files", idea_id),
        )?;
        info!(
            "Fetched snapshot for {} - members= {}, tasks= {}, messages= {}, posts= {}, files= {}",
            idea_id,
            members.len(),
            tasks.len(),
            messages.len(),
            posts.len(),
            files.len(),
        );
        Ok(ActivitySnapshot {
            members,
            tasks,
            messages,
            posts,
            files,
            captured_at: Some(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> BackendClient {
        BackendClient::new(&ApiConfig {
            base_url: base_url.to_owned(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn endpoints_keep_the_base_path() {
        let api = client("https://collab.example.com/api/v1/");
        let url = api.endpoint("tasks", "idea 42").unwrap();
        assert_eq!(
            url.as_str(),
            "https://collab.example.com/api/v1/tasks?ideaId=idea+42"
        );
        let url = client("http://localhost:3000/api")
            .endpoint("team-structure", "7")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/team-structure?ideaId=7");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = BackendClient::new(&ApiConfig {
            base_url: "not a url".to_owned(),
            timeout_secs: 5,
        });
        assert!(matches!(result, Err(ClientError::InvalidUrl(..))));
    }

    #[test]
    fn listings_accept_bare_and_wrapped_arrays() {
        let bare: Listing<Task> = serde_json::from_str(r#"[{"id": "t1"}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);
        let wrapped: Listing<Task> =
            serde_json::from_str(r#"{"data": [{"id": "t1"}, {"id": "t2"}]}"#).unwrap();
        assert_eq!(wrapped.into_vec().len(), 2);
    }

    #[test]
    fn team_structure_shapes() {
        let team: TeamStructure = serde_json::from_str(
            r#"{"members": [{"memberId": "m1", "userId": "u1", "isLead": true}], "roles": []}"#,
        )
        .unwrap();
        let members = match team {
            TeamStructure::Members(m) | TeamStructure::Team { members: m } => m,
        };
        assert_eq!(members.len(), 1);
        assert!(members[0].is_lead);
    }
}
