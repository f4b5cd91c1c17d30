use reqwest::{Method, Url};

use crate::query::Query;

pub const SEARCH_SCHEME: &str = "http";
pub const SEARCH_HOST: &str = "localhost";
pub const SEARCH_PORT: u16 = 18080;
pub const SEARCH_PATH: &str = "/search";

/// The search service this client talks to. Not user-configurable.
pub fn default_endpoint() -> Url {
    let mut url = Url::parse(&format!("{SEARCH_SCHEME}://{SEARCH_HOST}:{SEARCH_PORT}"))
        .expect("fixed search endpoint is a valid url");
    url.set_path(SEARCH_PATH);
    url
}

/// A fully built outbound request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    method: Method,
    url: Url,
}

impl RequestSpec {
    /// Same request shape as [`build_request`], against `base` instead of the
    /// fixed endpoint. Any query string already on `base` is replaced.
    pub fn for_endpoint(base: &Url, query: &Query) -> Self {
        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", query.as_str())
            .append_pair("format", "json");

        Self {
            method: Method::GET,
            url,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn params(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

pub fn build_request(query: &Query) -> RequestSpec {
    RequestSpec::for_endpoint(&default_endpoint(), query)
}

#[test]
fn test_build_request_shape() {
    let spec = build_request(&Query::new("hello world"));

    assert_eq!(spec.method(), &Method::GET);
    assert_eq!(spec.url().scheme(), "http");
    assert_eq!(spec.url().host_str(), Some("localhost"));
    assert_eq!(spec.url().port(), Some(18080));
    assert_eq!(spec.url().path(), "/search");
    assert_eq!(
        spec.url().as_str(),
        "http://localhost:18080/search?q=hello+world&format=json"
    );
    assert_eq!(
        spec.params(),
        vec![
            ("q".to_string(), "hello world".to_string()),
            ("format".to_string(), "json".to_string()),
        ]
    );
}

#[test]
fn test_build_request_encodes_reserved_chars() {
    let spec = build_request(&Query::new("a&format=xml#frag"));

    assert!(spec.url().fragment().is_none());
    assert_eq!(
        spec.params(),
        vec![
            ("q".to_string(), "a&format=xml#frag".to_string()),
            ("format".to_string(), "json".to_string()),
        ]
    );
}

#[test]
fn test_empty_query_is_still_sent() {
    let spec = build_request(&Query::new(""));
    assert_eq!(spec.url().query(), Some("q=&format=json"));
}

#[test]
fn test_for_endpoint_replaces_existing_query() {
    let base = Url::parse("http://127.0.0.1:9/search?format=html").unwrap();
    let spec = RequestSpec::for_endpoint(&base, &Query::new("x"));
    assert_eq!(spec.url().as_str(), "http://127.0.0.1:9/search?q=x&format=json");
}
