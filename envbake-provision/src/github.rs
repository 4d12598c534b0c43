//! Minimal GitHub REST client: create a repository for the authenticated user.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use envbake_core::GithubSettings;

use crate::error::ProvisionError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    private: bool,
}

/// Fields of the `201 Created` response envbake needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRepo {
    pub name: String,
    /// HTTPS clone URL, used as `origin`.
    pub clone_url: String,
    pub html_url: String,
}

/// Blocking client for `POST /user/repos`.
pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("envbake/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_settings(settings: &GithubSettings) -> Self {
        Self::new(&settings.api_url, settings.token.clone())
    }

    /// Create `name` under the token's user. Only `201 Created` counts as success.
    pub fn create_repo(&self, name: &str, private: bool) -> Result<CreatedRepo, ProvisionError> {
        let token = self.token.as_deref().ok_or(ProvisionError::MissingToken)?;
        let url = format!("{}/user/repos", self.api_url);

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("token {token}"))
            .set("Accept", "application/vnd.github+json")
            .send_json(CreateRepoRequest { name, private });

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(ProvisionError::Status {
                    name: name.to_string(),
                    status,
                    body: response.into_string().unwrap_or_default(),
                });
            }
            Err(other) => {
                return Err(ProvisionError::Transport {
                    url,
                    message: other.to_string(),
                });
            }
        };

        if response.status() != 201 {
            return Err(ProvisionError::Status {
                name: name.to_string(),
                status: response.status(),
                body: response.into_string().unwrap_or_default(),
            });
        }

        let repo: CreatedRepo = response
            .into_json()
            .map_err(|e| ProvisionError::Response(e.to_string()))?;
        tracing::info!(repo = %repo.name, url = %repo.html_url, "created GitHub repository");
        Ok(repo)
    }
}
