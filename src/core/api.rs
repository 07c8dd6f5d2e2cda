//! HTTP client for the Kotobaten API.
//!
//! All endpoints except login require a bearer token. A `401` on any of them is
//! reported as [`KotobatenError::AuthRequired`] so callers can drop the stored
//! token; other non-success statuses become [`KotobatenError::HttpStatus`].
//! There is no retry: a failure is reported to the caller right away.

use crate::core::error::{KotobatenError, Result};
use crate::core::models::{LoginResponse, NewCard, PracticeResponse, SearchResult};
use crate::core::practice::PracticeSource;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use std::time::Duration;

const PATH_LOGIN: &str = "auth/login";
const PATH_ADD_CARD: &str = "cards";
const PATH_SEARCH: &str = "search";
const PATH_RESET_CARD: &str = "cardsreset";
const PATH_PRACTICE: &str = "practice";

/// Something that can look up a term in the user's collection and the dictionary.
#[async_trait]
pub trait Searcher: Send + Sync {
    async fn search(&self, term: &str, token: &str) -> Result<SearchResult>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        // `Url::join` drops the last path segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            KotobatenError::validation(format!("Invalid API url '{normalized}': {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("kotobaten/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| KotobatenError::validation(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        log::debug!("{} {}", status, response.url());

        if status == StatusCode::UNAUTHORIZED {
            return Err(KotobatenError::AuthRequired);
        }
        if !status.is_success() {
            return Err(KotobatenError::http_status(
                status.as_u16(),
                response.url().as_str(),
            ));
        }
        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self.endpoint(PATH_LOGIN)?;
        let form = [
            ("username", email),
            ("password", password),
            ("grant_type", "password"),
        ];

        let response = self
            .send(self.client.post(url).form(&form))
            .await
            .map_err(|e| match e {
                KotobatenError::AuthRequired => {
                    KotobatenError::login_failed("invalid email or password")
                }
                other => other,
            })?;

        let body: LoginResponse = response.json().await?;
        Ok(body.access_token)
    }

    pub async fn add_word(
        &self,
        sense: &str,
        kanji: Option<&str>,
        kana: Option<&str>,
        note: Option<&str>,
        token: &str,
    ) -> Result<()> {
        let url = self.endpoint(PATH_ADD_CARD)?;
        let payload = NewCard {
            sense,
            kanji,
            kana,
            note,
            created: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            card_type: "Word",
        };

        self.send(self.client.post(url).bearer_auth(token).json(&payload))
            .await?;
        Ok(())
    }

    pub async fn reset_card(&self, card_id: u64, token: &str) -> Result<()> {
        let url = self.endpoint(PATH_RESET_CARD)?;
        self.send(
            self.client
                .post(url)
                .query(&[("cardId", card_id)])
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Searcher for ApiClient {
    async fn search(&self, term: &str, token: &str) -> Result<SearchResult> {
        let url = self.endpoint(PATH_SEARCH)?;
        let response = self
            .send(
                self.client
                    .get(url)
                    .query(&[("term", term)])
                    .bearer_auth(token),
            )
            .await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PracticeSource for ApiClient {
    async fn practice(&self, count: u32, token: &str) -> Result<Option<PracticeResponse>> {
        let url = self.endpoint(PATH_PRACTICE)?;
        let response = self
            .send(
                self.client
                    .get(url)
                    .query(&[("count", count)])
                    .bearer_auth(token),
            )
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_onto_base() {
        let client = ApiClient::new("https://kotobaten-api.fly.dev/").unwrap();
        assert_eq!(
            client.endpoint(PATH_LOGIN).unwrap().as_str(),
            "https://kotobaten-api.fly.dev/auth/login"
        );
        assert_eq!(
            client.endpoint(PATH_ADD_CARD).unwrap().as_str(),
            "https://kotobaten-api.fly.dev/cards"
        );
    }

    #[test]
    fn test_base_without_trailing_slash_keeps_path() {
        let client = ApiClient::new("http://localhost:8080/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.endpoint(PATH_SEARCH).unwrap().as_str(),
            "http://localhost:8080/api/search"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url").err().unwrap();
        assert!(err.to_string().contains("Invalid API url"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_request_error() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let client = ApiClient::new("http://127.0.0.1:9/").unwrap();
        let err = client.search("neko", "token").await.unwrap_err();
        assert!(matches!(err, KotobatenError::Request(_)));
    }
}
