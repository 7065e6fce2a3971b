use std::error;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(String),
    Network(reqwest::Error),
    BadStatus(reqwest::StatusCode),
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FetchError::InvalidUrl(ref url) => write!(f, "Invalid URL: {}", url),
            FetchError::Network(ref err) => write!(f, "Network Error: {}", err),
            FetchError::BadStatus(ref status) => write!(f, "Unexpected HTTP Status: {}", status),
            FetchError::Decode(ref err) => write!(f, "Decode Error: {}", err),
        }
    }
}

impl error::Error for FetchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            FetchError::Network(ref err) => Some(err),
            FetchError::Decode(ref err) => Some(err),
            FetchError::InvalidUrl(_) | FetchError::BadStatus(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> FetchError {
        FetchError::Network(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> FetchError {
        FetchError::Decode(err)
    }
}

impl From<reqwest::StatusCode> for FetchError {
    fn from(status: reqwest::StatusCode) -> FetchError {
        FetchError::BadStatus(status)
    }
}
