use thiserror::Error;

/// Everything that can stop a query cycle before the response is printed.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read search query: {0}")]
    Input(#[source] std::io::Error),

    #[error("could not connect to search service: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("request to search service timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("request to search service failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("search service returned HTTP {status} for url ({url})")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: reqwest::Url,
    },

    #[error("failed to parse search response as JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to write search results: {0}")]
    Output(#[source] std::io::Error),
}

impl RequestError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RequestError::Parse(_) => 2,
            _ => 1,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RequestError::Timeout(e)
        } else if e.is_connect() {
            RequestError::Connection(e)
        } else {
            RequestError::Transport(e)
        }
    }
}

#[test]
fn test_exit_codes() {
    let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    assert_eq!(RequestError::Parse(parse).exit_code(), 2);

    let input = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
    assert_eq!(RequestError::Input(input).exit_code(), 1);

    let broken = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
    let output = RequestError::Output(broken);
    assert_eq!(output.exit_code(), 1);
    assert!(output.to_string().starts_with("failed to write search results"));

    let status = RequestError::HttpStatus {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        url: reqwest::Url::parse("http://localhost:18080/search").unwrap(),
    };
    assert_eq!(status.exit_code(), 1);
    assert!(status.to_string().starts_with("search service returned HTTP 500"));
}
