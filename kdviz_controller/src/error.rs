// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for validation and the search round trip.

/// User input that is not a usable image id. No request is sent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Nothing was entered.
    #[error("Please enter a valid ID between 0 and {max}.")]
    Empty {
        /// Largest accepted id.
        max: u32,
    },
    /// The input is not an integer.
    #[error("{input:?} is not a number. Please enter a valid ID between 0 and {max}.")]
    NotANumber {
        /// Trimmed input.
        input: String,
        /// Largest accepted id.
        max: u32,
    },
    /// An integer outside `0..=max`, including integers too large to represent.
    #[error("ID {input} is out of range. Please enter a valid ID between 0 and {max}.")]
    OutOfRange {
        /// Trimmed input.
        input: String,
        /// Largest accepted id.
        max: u32,
    },
}

/// The request did not produce a success response.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Connection, timeout, or body read failure.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Full URL.
        endpoint: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{endpoint} responded with status {status}{}", detail(.message.as_deref()))]
    Status {
        /// Full URL.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, when present.
        message: Option<String>,
    },
}

fn detail(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

/// A search request failed.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No usable response.
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// A success response whose body does not decode to a search result.
    #[error("malformed response from {endpoint}: {message}")]
    Malformed {
        /// Full URL, or a backend name.
        endpoint: String,
        /// What was wrong.
        message: String,
    },
}

impl SearchError {
    /// One-line message for the result panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(NetworkError::Transport { .. }) => {
                "Error: Could not connect to the search server. Is it running?".to_owned()
            }
            Self::Network(NetworkError::Status {
                status, message, ..
            }) => format!(
                "Error: Server responded with status {status}{}",
                detail(message.as_deref())
            ),
            Self::Malformed { .. } => {
                "Error: The search server sent a response that could not be read.".to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_range() {
        assert_eq!(
            ValidationError::Empty { max: 4999 }.to_string(),
            "Please enter a valid ID between 0 and 4999."
        );
        let e = ValidationError::OutOfRange {
            input: "5000".into(),
            max: 4999,
        };
        assert!(e.to_string().starts_with("ID 5000 is out of range."));
    }

    #[test]
    fn status_error_includes_server_message() {
        let e = NetworkError::Status {
            endpoint: "http://localhost:8000/api/search?id=9".into(),
            status: 404,
            message: Some("ID not found".into()),
        };
        assert_eq!(
            e.to_string(),
            "http://localhost:8000/api/search?id=9 responded with status 404: ID not found"
        );
        let s = SearchError::from(e);
        assert_eq!(
            s.user_message(),
            "Error: Server responded with status 404: ID not found"
        );
    }

    #[test]
    fn status_error_without_body() {
        let e = NetworkError::Status {
            endpoint: "x".into(),
            status: 500,
            message: None,
        };
        assert_eq!(e.to_string(), "x responded with status 500");
    }
}
