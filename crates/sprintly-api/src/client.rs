//! Blocking client for the Sprint.ly REST API.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use sprintly_core::{Item, Product};
use tracing::debug;

use crate::error::{ApiError, Result};

/// Root of the hosted API.
const API_BASE: &str = "https://sprint.ly/api";

/// Page size for item pagination.
const PAGE_LIMIT: usize = 100;

/// Current user as returned by `user/whoami.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Whoami {
    pub id: u64,
    pub email: String,
}

/// Error body the API returns in place of the requested payload, sometimes
/// with a 200 status.
#[derive(Debug, Clone, Deserialize)]
struct ApiFailure {
    code: u32,
    #[serde(default)]
    message: String,
}

/// Authenticated Sprint.ly API client.
pub struct Client {
    http: reqwest::blocking::Client,
    base: String,
    user: String,
    key: String,
}

impl Client {
    #[must_use]
    pub fn new(user: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base: API_BASE.to_owned(),
            user: user.into(),
            key: key.into(),
        }
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Current authenticated user; the cheapest credential check the API
    /// offers.
    ///
    /// # Errors
    /// Returns an error on transport failure, an API error body, or an
    /// unparseable response.
    pub fn whoami(&self) -> Result<Whoami> {
        self.get("user/whoami.json")
    }

    /// All products visible to the account.
    ///
    /// # Errors
    /// Returns an error on transport failure or an API error body.
    pub fn products(&self) -> Result<Vec<Product>> {
        self.get("products.json")
    }

    /// All items in `product_id` assigned to `user_id`, with children
    /// included in the flat response, following offset/limit pagination
    /// until a short or empty page.
    ///
    /// # Errors
    /// Returns an error on transport failure or an API error body.
    pub fn assigned_items(&self, product_id: u64, user_id: u64) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let page: Vec<Item> = self.get(&format!(
                "products/{product_id}/items.json?assigned_to={user_id}&children=1&limit={PAGE_LIMIT}&offset={offset}"
            ))?;
            let page_len = page.len();
            items.extend(page);

            if page_len < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;
        }

        debug!(product_id, count = items.len(), "fetched assigned items");
        Ok(items)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{path}", self.base);
        debug!(url = %url, "api request");

        let body = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .basic_auth(&self.user, Some(&self.key))
            .send()?
            .text()?;

        decode(&body)
    }
}

/// Decode an API response body, surfacing `{"code": ..., "message": ...}`
/// error bodies as `ApiError::Api`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    if let Ok(failure) = serde_json::from_str::<ApiFailure>(body) {
        return Err(ApiError::Api {
            code: failure.code,
            message: failure.message,
        });
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_a_payload() {
        let whoami: Whoami =
            decode(r#"{"id": 7, "email": "dev@example.com", "first_name": "Dev"}"#).unwrap();
        assert_eq!(
            whoami,
            Whoami {
                id: 7,
                email: "dev@example.com".to_owned()
            }
        );
    }

    #[test]
    fn surfaces_error_bodies() {
        let result = decode::<Whoami>(r#"{"code": 403, "message": "Not allowed"}"#);
        match result {
            Err(ApiError::Api { code, message }) => {
                assert_eq!(code, 403);
                assert_eq!(message, "Not allowed");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn an_item_list_is_not_mistaken_for_an_error() {
        let items: Vec<Item> = decode(
            r#"[{"number": 1, "type": "story", "status": "backlog", "title": "t"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn malformed_bodies_are_json_errors() {
        assert!(matches!(
            decode::<Whoami>("not json"),
            Err(ApiError::Json(_))
        ));
    }
}
