use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Short message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(err) if err.is_timeout() => "The server took too long to respond".to_string(),
            Error::Http(_) => "Could not reach the server".to_string(),
            Error::Api { status: 401 | 403, .. } | Error::Unauthenticated => {
                "Please log in to manage favorites".to_string()
            }
            Error::Api { status: 404, .. } => "Recipe not found".to_string(),
            Error::Api { message, .. } if !message.trim().is_empty() => message.trim().to_string(),
            Error::Api { status, .. } => format!("Server error ({})", status),
            Error::Serialization(_) => "Unexpected response from the server".to_string(),
            Error::Url(_) | Error::InvalidInput(_) => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
