use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::errors::RequestError;
use crate::query::resolve_query;
use crate::request::{RequestSpec, default_endpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    AwaitingQuery,
    RequestInFlight,
    Succeeded,
    Failed,
}

/// What the backend sent back. The body is kept as raw text until `report`.
#[derive(Debug)]
pub struct SearchResponse {
    pub status: StatusCode,
    pub body: String,
}

pub struct QueryRunner {
    client: Client,
    endpoint: Url,
    state: RunState,
}

impl QueryRunner {
    /// Runner for the fixed search endpoint. `timeout` of `None` lets the
    /// request block indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_endpoint(default_endpoint(), timeout)
    }

    pub fn with_endpoint(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            state: RunState::AwaitingQuery,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        log::debug!("query runner: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub async fn execute(&self, request: &RequestSpec) -> Result<SearchResponse, RequestError> {
        log::debug!("sending {} {}", request.method(), request.url());

        let res = self
            .client
            .request(request.method().clone(), request.url().clone())
            .send()
            .await?;

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            let url = res.url().clone();
            return Err(RequestError::HttpStatus { status, url });
        }

        let body = res.text().await?;
        Ok(SearchResponse { status, body })
    }

    /// Parses the body as JSON and writes it, pretty-printed, to `out`.
    pub fn report<W: Write>(
        &self,
        response: &SearchResponse,
        out: &mut W,
    ) -> Result<(), RequestError> {
        log::debug!(
            "search service answered {} with {} bytes",
            response.status,
            response.body.len()
        );
        let value: Value = serde_json::from_str(&response.body).map_err(RequestError::Parse)?;
        writeln!(out, "{value:#}").map_err(RequestError::Output)?;
        Ok(())
    }

    async fn cycle<R, W>(
        &mut self,
        args: &[String],
        input: &mut R,
        out: &mut W,
    ) -> Result<(), RequestError>
    where
        R: BufRead,
        W: Write,
    {
        let query = resolve_query(args, input, out)?;
        let request = RequestSpec::for_endpoint(&self.endpoint, &query);

        self.transition(RunState::RequestInFlight);
        let response = self.execute(&request).await?;

        self.report(&response, out)
    }

    /// One full query-and-report cycle. Failures are written to `out` as a
    /// single `Error: ` line; the returned value is the process exit code.
    pub async fn run<R, W>(&mut self, args: &[String], input: &mut R, out: &mut W) -> u8
    where
        R: BufRead,
        W: Write,
    {
        match self.cycle(args, input, out).await {
            Ok(()) => {
                self.transition(RunState::Succeeded);
                0
            }
            Err(e) => {
                self.transition(RunState::Failed);
                log::warn!("search query failed: {e}");
                // An unanswered prompt leaves the cursor mid-line.
                let prompt_pending = args.is_empty() && matches!(e, RequestError::Input(_));
                let line = if prompt_pending { "\n" } else { "" };
                // Nothing left to do if stdout itself is gone.
                let _ = writeln!(out, "{line}Error: {e}");
                e.exit_code()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> SearchResponse {
        SearchResponse {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_report_pretty_prints_json() {
        let runner = QueryRunner::new(None).unwrap();
        let mut out = Vec::new();

        runner.report(&response(r#"{"results": []}"#), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with('\n'));
        let value: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value, serde_json::json!({ "results": [] }));
    }

    #[test]
    fn test_report_rejects_non_json() {
        let runner = QueryRunner::new(None).unwrap();
        let mut out = Vec::new();

        let err = runner.report(&response("not json"), &mut out).unwrap_err();

        assert!(matches!(err, RequestError::Parse(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_new_runner_awaits_query() {
        let runner = QueryRunner::new(Some(Duration::from_secs(1))).unwrap();
        assert_eq!(runner.state(), RunState::AwaitingQuery);
        assert_eq!(runner.endpoint().as_str(), "http://localhost:18080/search");
    }
}
