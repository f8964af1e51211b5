use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScrapeError {
    Network(String),
    JsonParse(String),
    IoError(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(msg) => write!(f, "Network error: {msg}"),
            ScrapeError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ScrapeError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl Error for ScrapeError {}
