use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for NotifierError {
    fn from(e: reqwest::Error) -> Self {
        // the request URL carries the bot token
        NotifierError::RequestFailed(e.without_url().to_string())
    }
}
