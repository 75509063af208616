use thiserror::Error;

/// Everything that can go wrong between the user typing into a prompt and the
/// server answering. Callers match on this exhaustively instead of poking at
/// optional fields.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local field validation failed. Never reaches the network layer.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The server answered with a non-2xx status.
    #[error("server responded {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never completed (DNS, refused connection, reset...).
    #[error("network error: {message}")]
    Network { message: String },

    /// The server answered 2xx but the body was not the JSON we expected.
    #[error("invalid response body: {message}")]
    Parse { message: String },
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Like [`user_message`](Self::user_message), but for the login flow,
    /// where a 401 means the credentials themselves were wrong.
    pub fn login_message(&self) -> String {
        match self {
            ApiError::Api { status: 401, .. } => "Невірний логін або пароль!".to_string(),
            _ => self.user_message(),
        }
    }

    /// Localized text for the status-message area of the terminal.
    /// The wording matches what users of the web client already know.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Api { status: 400, .. } => "Дані заповнені некоректно!".to_string(),
            ApiError::Api { status: 409, .. } => {
                "Користувач з таким іменем вже існує!".to_string()
            }
            ApiError::Api { status: 500, .. } => "Сервер помер. Спробуй пізніше.".to_string(),
            ApiError::Api { message, .. } => format!("Невідома помилка: {}", message),
            ApiError::Network { message } | ApiError::Parse { message } => {
                format!("Невідома помилка: {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> ApiError {
        ApiError::Api {
            status,
            message: "whatever".to_string(),
        }
    }

    #[test]
    fn common_statuses_get_localized_text() {
        assert_eq!(api(400).user_message(), "Дані заповнені некоректно!");
        assert_eq!(api(409).user_message(), "Користувач з таким іменем вже існує!");
        assert_eq!(api(500).user_message(), "Сервер помер. Спробуй пізніше.");
    }

    #[test]
    fn login_maps_401_to_wrong_credentials() {
        assert_eq!(api(401).login_message(), "Невірний логін або пароль!");
        // Everything else falls through to the shared mapping.
        assert_eq!(api(500).login_message(), "Сервер помер. Спробуй пізніше.");
    }

    #[test]
    fn unknown_status_falls_back_to_server_message() {
        assert_eq!(api(418).user_message(), "Невідома помилка: whatever");
    }

    #[test]
    fn network_failure_carries_no_status() {
        let err = ApiError::Network {
            message: "connection refused".to_string(),
        };
        assert!(err.user_message().contains("connection refused"));
    }
}
