// src/utils/http.rs

//! HTTP client utilities.

use std::borrow::Cow;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::Result;
use crate::models::ClientConfig;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.9";

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Something that can perform a GET request.
///
/// Transport failures are errors; any received status, including 4xx and
/// 5xx, is a successful `HttpResponse` for the caller to judge.
pub trait HttpSession {
    fn get(&self, url: &str, params: &[(&str, String)], timeout: Duration)
    -> Result<HttpResponse>;
}

/// Create a configured blocking HTTP client.
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// `HttpSession` backed by a blocking reqwest client.
pub struct ReqwestSession {
    client: Client,
}

impl ReqwestSession {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }
}

impl HttpSession for ReqwestSession {
    fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
