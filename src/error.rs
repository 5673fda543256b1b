#[derive(Debug, thiserror::Error)]
pub enum CovidError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream {url} returned status {status}")]
    Upstream { url: String, status: u16 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task error: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, CovidError>;
