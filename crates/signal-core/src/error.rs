use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid order: {0}")]
    InvalidOrder(String),
}
