use reqwest::StatusCode;

/// Error type returned when delivering an event to Seq.
#[derive(thiserror::Error, Debug)]
pub enum SeqError {
    /// The event document could not be turned into JSON.
    #[error("failed to marshal log entry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configured endpoint does not form a valid ingestion URL.
    #[error("failed to create request: {0}")]
    Request(#[from] url::ParseError),

    /// Transport-level failure: connect, timeout, TLS.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than 201 Created. The
    /// response body is carried verbatim.
    #[error("seq returned status {}: {}", .status.as_u16(), .body)]
    Rejected { status: StatusCode, body: String },
}

impl SeqError {
    /// HTTP status of a rejected ingestion, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SeqError::Rejected { status, .. } => Some(*status),
            SeqError::Http(err) => err.status(),
            SeqError::Serialize(_) | SeqError::Request(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_carries_status_and_body() {
        let err = SeqError::Rejected {
            status: StatusCode::BAD_REQUEST,
            body: "invalid payload".to_string(),
        };
        assert_eq!(err.to_string(), "seq returned status 400: invalid payload");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }
}
