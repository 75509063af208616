use crate::error::ApiError;
use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Registration payload. Constructed from prompt input, sent once, never stored.
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Public user fields as the server returns them. The server owns this shape,
/// so everything beyond the email is optional on our side.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Successful login response.
#[derive(Debug, Deserialize)]
pub struct Session {
    pub token: String,
}

/// Partial profile update. `None` fields are left out of the request body so
/// the server only touches what the user actually changed.
#[derive(Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// JSON-over-HTTP client for the Balachka user service.
///
/// Holds the base URL and the session token. Constructed once in main and
/// passed to whichever flow needs it—there is no global instance. The token is
/// attached as a `Bearer` header on every request while it is held; login and
/// logout are the only things that change it.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Builds a client for the given base URL.
    ///
    /// The URL must be absolute http(s); a trailing slash is tolerated and
    /// stripped so endpoint paths can always start with `/`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            ApiError::validation("api-url", format!("Некоректна адреса API: {}", e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::validation(
                "api-url",
                format!("Некоректна адреса API: схема {}", parsed.scheme()),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Seeds the token from persisted state at startup.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Drops the held token. Purely local—no network call, cannot fail.
    /// The persisted copy is cleared separately by the logout flow.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Performs one JSON request against `base_url + endpoint`.
    ///
    /// On 2xx the body is parsed into `T`. Anything else becomes an
    /// `ApiError`: `Api` for a non-2xx status (message pulled from the JSON
    /// error body when there is one, raw text otherwise), `Network` when the
    /// call never completed, `Parse` when a 2xx body is not valid JSON.
    pub async fn request<T, B>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("Content-Type", "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            debug!("{} -> {}: {}", url, status, text);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Parse {
            message: e.to_string(),
        })
    }

    /// POST `/users/register`. 409 means the email is already taken.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        self.request("/users/register", Method::POST, Some(user)).await
    }

    /// POST `/users/login`. The caller decides whether to persist the token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let credentials = serde_json::json!({
            "email": email,
            "password": password,
        });
        self.request("/users/login", Method::POST, Some(&credentials)).await
    }

    /// GET `/users/me`. Fails with 401 when the token is missing or expired.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request("/users/me", Method::GET, None::<&()>).await
    }

    /// PUT `/users/profile` with only the changed fields.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.request("/users/profile", Method::PUT, Some(update)).await
    }
}

/// Pulls a human-readable message out of an error body.
/// The server usually sends `{"message": "..."}`, but the registration path
/// answers with plain text, so fall back to the raw body as-is.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json["message"].as_str().unwrap_or(body).to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn non_url_base_is_rejected() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "api-url", .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ApiClient::new("ftp://localhost/api").unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "api-url", .. }));
    }

    #[test]
    fn logout_drops_the_token() {
        let mut client = ApiClient::new("http://localhost:3000/api")
            .unwrap()
            .with_token(Some("tok".to_string()));
        assert!(client.has_token());
        client.logout();
        assert!(!client.has_token());
    }

    #[test]
    fn error_message_comes_from_json_body() {
        assert_eq!(extract_message(r#"{"message":"email taken"}"#), "email taken");
    }

    #[test]
    fn error_message_falls_back_to_raw_text() {
        assert_eq!(extract_message("user already exists"), "user already exists");
        // JSON without a "message" field also falls through to the raw body.
        assert_eq!(extract_message(r#"{"error":"nope"}"#), r#"{"error":"nope"}"#);
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            name: Some("Олена".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Олена"}));
    }
}
