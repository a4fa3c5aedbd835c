//! HTTP transport carrying the browser session identity.
//!
//! Thin wrapper over `reqwest`: it attaches the identity headers and cookies
//! that let requests through the upstream's bot-management layer, applies the
//! configured timeout, and streams response bodies back. No business logic
//! and no status classification happen here; the client decides what a status
//! means.

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN, REFERER};
use serde::Serialize;
use tracing::debug;

use crate::config::SessionConfig;
use crate::{Error, Result};

/// Production endpoint root; overridable for mock servers in tests.
pub(crate) const DEFAULT_BASE_URL: &str = "https://pi.ai";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub(crate) fn new(config: &SessionConfig, base_url: Option<&str>) -> Result<Self> {
        if config.timeout().is_zero() {
            return Err(Error::client("timeout must be greater than zero"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://pi.ai"));
        headers.insert(REFERER, HeaderValue::from_static("https://pi.ai/talk"));
        headers.insert("X-Api-Version", HeaderValue::from_static("3"));
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        let cookie = HeaderValue::from_str(&config.cookie_header())
            .map_err(|_| Error::client("session cookie values contain invalid characters"))?;
        headers.insert(COOKIE, cookie);

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::client(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self { client, base_url })
    }

    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        self.client.post(&url).json(body).send().await
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        self.client.get(&url).query(query).send().await
    }

    /// Drain a response body chunk by chunk into one buffer.
    pub(crate) async fn collect_body(
        response: reqwest::Response,
    ) -> std::result::Result<Bytes, reqwest::Error> {
        let mut stream = response.bytes_stream();
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

/// Human-readable cause for a transport-level failure, so the surfaced
/// message distinguishes "network is down" from "peer is slow".
pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}
