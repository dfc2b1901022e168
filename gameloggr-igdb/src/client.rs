use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::credentials::Credentials;
use crate::error::IgdbError;
use crate::types::{IgdbGame, IgdbPlatform, TokenResponse};

pub const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const API_BASE_URL: &str = "https://api.igdb.com/v4/";
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

pub const SEARCH_LIMIT: usize = 25;
pub const PLATFORM_PAGE_SIZE: usize = 500;

/// HTTP client for the IGDB v4 API with token caching and rate limiting.
pub struct IgdbClient {
    http: reqwest::Client,
    creds: Credentials,
    token_url: String,
    api_base: String,
    token: Arc<Mutex<Option<String>>>,
    last_request: Arc<Mutex<Instant>>,
}

impl IgdbClient {
    pub fn new(creds: Credentials) -> Result<Self, IgdbError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            creds,
            token_url: TOKEN_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
            token: Arc::new(Mutex::new(None)),
            last_request: Arc::new(Mutex::new(Instant::now() - MIN_REQUEST_INTERVAL)),
        })
    }

    /// Point the client at different token and API endpoints.
    pub fn with_endpoints(mut self, token_url: impl Into<String>, api_base: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self.api_base = api_base.into();
        self
    }

    /// Return the cached access token, fetching one on first use.
    pub async fn access_token(&self) -> Result<String, IgdbError> {
        let mut cached = self.token.lock().await;
        if let Some(ref token) = *cached {
            return Ok(token.clone());
        }

        log::debug!("Requesting IGDB access token");
        self.rate_limit().await;

        let resp = self
            .http
            .post(&self.token_url)
            .query(&[
                ("client_id", self.creds.client_id.as_str()),
                ("client_secret", self.creds.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(IgdbError::InvalidCredentials(
                "Client id or secret rejected".to_string(),
            ));
        }
        check_status(status, &text)?;

        let token: TokenResponse = parse_body(&text, "access token")?;
        *cached = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    /// Search games by name. Returns at most [`SEARCH_LIMIT`] results.
    pub async fn search_games(&self, query: &str) -> Result<Vec<IgdbGame>, IgdbError> {
        let games: Vec<IgdbGame> = self.post_query("games", search_query(query)).await?;
        log::debug!("IGDB search '{}' returned {} games", query, games.len());
        Ok(games)
    }

    /// Fetch the full platform catalog, sorted by name.
    pub async fn fetch_all_platforms(&self) -> Result<Vec<IgdbPlatform>, IgdbError> {
        let mut platforms: Vec<IgdbPlatform> = Vec::new();
        let mut offset = 0;
        loop {
            let page: Vec<IgdbPlatform> = self
                .post_query("platforms", platform_page_query(offset))
                .await?;
            log::debug!("Fetched {} platforms at offset {}", page.len(), offset);
            let done = page.len() < PLATFORM_PAGE_SIZE;
            platforms.extend(page);
            if done {
                break;
            }
            offset += PLATFORM_PAGE_SIZE;
        }

        platforms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(platforms)
    }

    async fn post_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: String,
    ) -> Result<T, IgdbError> {
        let token = self.access_token().await?;
        self.rate_limit().await;

        let resp = self
            .http
            .post(format!("{}{}", self.api_base, endpoint))
            .header("Client-ID", &self.creds.client_id)
            .bearer_auth(token)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        check_status(status, &text)?;
        parse_body(&text, endpoint)
    }

    /// Enforce rate limiting: wait until at least MIN_REQUEST_INTERVAL has
    /// passed since the last request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
        }
        *last = Instant::now();
    }
}

/// Query body for a name search.
pub fn search_query(query: &str) -> String {
    let escaped = query.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "search \"{escaped}\"; fields name,cover.url,first_release_date,genres.name,\
         platforms.name,platforms.platform_logo.url,involved_companies.developer,\
         involved_companies.publisher,involved_companies.company.name; limit {SEARCH_LIMIT};"
    )
}

/// Query body for one page of the platform catalog.
pub fn platform_page_query(offset: usize) -> String {
    format!("fields id, name, platform_logo.url; limit {PLATFORM_PAGE_SIZE}; offset {offset};")
}

fn check_status(status: reqwest::StatusCode, body: &str) -> Result<(), IgdbError> {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(IgdbError::InvalidCredentials(
            "Credentials rejected".to_string(),
        ));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(IgdbError::RateLimit);
    }
    if !status.is_success() {
        return Err(IgdbError::ServerError {
            status: status.as_u16(),
            message: truncate(body).to_string(),
        });
    }
    Ok(())
}

fn parse_body<T: DeserializeOwned>(text: &str, what: &str) -> Result<T, IgdbError> {
    serde_json::from_str(text).map_err(|e| {
        IgdbError::Api(format!(
            "Failed to parse {what}: {e}. Response: {}",
            truncate(text)
        ))
    })
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
