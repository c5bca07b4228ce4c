//! Source-hosting API client.
//!
//! Fetches the public footprint of an account (repositories, language
//! byte shares, README text, star/fork counts) and condenses it into a
//! `SourceProfile`. Every call is bounded by a request timeout and any
//! failure is reported as a typed error so the pipeline can distinguish
//! "no data" from "call failed"; neither aborts the run.

use std::collections::HashMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::profile::models::{GithubActivity, LanguageShare, RepoSummary, SourceProfile};
use crate::taxonomy::{matcher, SkillVocabulary};

const API_BASE: &str = "https://api.github.com";
const CLIENT_USER_AGENT: &str = concat!("compass-api/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// READMEs are only scanned for the first few repositories; they are one
/// HTTP call each.
const README_SCAN_LIMIT: usize = 10;
/// Per-repo language and commit lookups are likewise one call each, so
/// large accounts are sampled rather than walked exhaustively.
const REPO_DETAIL_LIMIT: usize = 30;
const LANGUAGE_SHARE_LIMIT: usize = 10;
const TOP_REPO_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}) for {resource}")]
    Api { status: u16, resource: String },
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    name: Option<String>,
    location: Option<String>,
    public_repos: u32,
    followers: u32,
    following: u32,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: u32,
    forks_count: u32,
    html_url: String,
}

/// Thin client over the source-hosting REST API. Authentication is
/// optional; unauthenticated calls just hit lower rate limits.
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            token,
        }
    }

    /// Analyzes an account and condenses it into a `SourceProfile`. The
    /// README text of the leading repositories is scanned against the
    /// technical vocabulary; language byte counts become percentage
    /// shares.
    pub async fn analyze_profile(
        &self,
        username: &str,
        vocabulary: &SkillVocabulary,
    ) -> Result<SourceProfile, GithubError> {
        let user = self.fetch_user(username).await?;
        let repos = self.fetch_repos(username).await?;

        let mut language_bytes: HashMap<String, u64> = HashMap::new();
        let mut total_commits: u32 = 0;
        for repo in repos.iter().take(REPO_DETAIL_LIMIT) {
            // Per-repo fetches are best effort; a single failing
            // repository must not sink the whole account.
            match self.fetch_languages(username, &repo.name).await {
                Ok(languages) => {
                    for (language, bytes) in languages {
                        *language_bytes.entry(language).or_insert(0) += bytes;
                    }
                }
                Err(e) => warn!("language fetch failed for {}: {e}", repo.name),
            }
            total_commits += self.fetch_commit_count(username, &repo.name).await.unwrap_or(0);
        }

        let mut readme_skills: Vec<String> = Vec::new();
        for repo in repos.iter().take(README_SCAN_LIMIT) {
            if let Some(readme) = self.fetch_readme(username, &repo.name).await {
                for skill in matcher::find_present_skills(&readme, vocabulary.technical()) {
                    if !readme_skills.contains(&skill) {
                        readme_skills.push(skill);
                    }
                }
            }
        }

        let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
        let total_forks = repos.iter().map(|r| r.forks_count).sum();

        let mut by_stars = repos;
        by_stars.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        let top_repositories = by_stars
            .iter()
            .take(TOP_REPO_LIMIT)
            .map(|r| RepoSummary {
                name: r.name.clone(),
                description: r.description.clone(),
                language: r.language.clone(),
                stars: r.stargazers_count,
                url: r.html_url.clone(),
            })
            .collect();

        let activity = GithubActivity {
            username: user.login.clone(),
            profile_url: format!("https://github.com/{}", user.login),
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            total_commits,
            total_stars,
            total_forks,
            languages: language_shares(&language_bytes),
            top_repositories,
        };

        debug!(
            repos = activity.public_repos,
            languages = activity.languages.len(),
            skills = readme_skills.len(),
            "analyzed source-hosting account"
        );

        Ok(SourceProfile {
            name: user.name.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            technical_skills: readme_skills,
            github: Some(activity),
            ..Default::default()
        })
    }

    async fn fetch_user(&self, username: &str) -> Result<UserResponse, GithubError> {
        self.get_json(&format!("{API_BASE}/users/{username}")).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<RepoResponse>, GithubError> {
        self.get_json(&format!(
            "{API_BASE}/users/{username}/repos?type=owner&per_page=100"
        ))
        .await
    }

    async fn fetch_languages(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<HashMap<String, u64>, GithubError> {
        self.get_json(&format!("{API_BASE}/repos/{username}/{repo}/languages"))
            .await
    }

    /// Commit count for one repository, read from the pagination Link
    /// header at page size 1: the rel="last" page number equals the
    /// count. Empty or unreadable repositories count as 0.
    async fn fetch_commit_count(&self, username: &str, repo: &str) -> Option<u32> {
        let url = format!("{API_BASE}/repos/{username}/{repo}/commits?per_page=1");
        let response = self
            .http
            .get(&url)
            .headers(self.headers(HeaderValue::from_static("application/vnd.github+json")))
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        match response.headers().get(reqwest::header::LINK) {
            Some(link) => parse_last_page(link.to_str().ok()?),
            // No pagination header: the single returned page is all
            // there is.
            None => Some(1),
        }
    }

    /// README body as raw text, or None when absent or unreadable.
    async fn fetch_readme(&self, username: &str, repo: &str) -> Option<String> {
        let url = format!("{API_BASE}/repos/{username}/{repo}/readme");
        let response = self
            .http
            .get(&url)
            .headers(self.headers(HeaderValue::from_static("application/vnd.github.raw")))
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GithubError> {
        let response = self
            .http
            .get(url)
            .headers(self.headers(HeaderValue::from_static("application/vnd.github+json")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Api {
                status: status.as_u16(),
                resource: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    fn headers(&self, accept: HeaderValue) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, accept);
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        if let Some(token) = &self.token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }
}

static LAST_PAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[?&]page=(\d+)>;\s*rel="last""#).expect("last page regex"));

/// Page number of the rel="last" link in a pagination header.
fn parse_last_page(link_header: &str) -> Option<u32> {
    LAST_PAGE_RE
        .captures(link_header)
        .and_then(|caps| caps.get(1)?.as_str().parse().ok())
}

/// Byte counts to percentage shares, descending, capped.
fn language_shares(language_bytes: &HashMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = language_bytes.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = language_bytes
        .iter()
        .map(|(language, bytes)| LanguageShare {
            language: language.clone(),
            percent: (*bytes as f64 / total as f64 * 10_000.0).round() / 100.0,
        })
        .collect();
    // Descending by share; names break ties so the output is stable.
    shares.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.language.cmp(&b.language))
    });
    shares.truncate(LANGUAGE_SHARE_LIMIT);
    shares
}
