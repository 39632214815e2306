//! The HTTP GET primitive which [crate::Session] is built on.
//!
//! [ReqwestTransport] is what you want. The [Transport] trait exists so that
//! a [crate::Session] can be driven by something other than a real network,
//! e.g. a recording fake in tests.

use crate::errors::IsicError;
use crate::types::AuthToken;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Name of the header carrying the authentication token.
pub const GIRDER_TOKEN: &str = "Girder-Token";

/// A HTTP GET request to the archive.
#[derive(Clone, Copy)]
pub struct GetRequest<'a> {
    pub url: &'a str,
    /// Sent as the [GIRDER_TOKEN] header when present.
    pub token: Option<&'a AuthToken>,
    /// Username and password for HTTP basic auth, only used to log in.
    pub basic_auth: Option<(&'a str, &'a str)>,
}

impl<'a> GetRequest<'a> {
    pub fn new(url: &'a str) -> Self {
        Self {
            url,
            token: None,
            basic_auth: None,
        }
    }
}

/// Status and fully-read body of a response. Redirects are already followed.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something which can perform blocking HTTP GET requests.
pub trait Transport {
    fn get(&self, request: &GetRequest<'_>) -> Result<RawResponse, IsicError>;
}

/// [Transport] implemented by a blocking [reqwest] client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

/// Builder for [ReqwestTransport].
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Set a timeout for every request. There is no timeout by default.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn build(self) -> Result<ReqwestTransport, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .default_headers(accept_json())
            .timeout(self.timeout)
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }
}

fn accept_json() -> HeaderMap {
    HeaderMap::from_iter([(ACCEPT, HeaderValue::from_static("application/json"))])
}

impl ReqwestTransport {
    fn request(&self, request: &GetRequest<'_>) -> reqwest::blocking::RequestBuilder {
        let mut req = self.client.get(request.url);
        if let Some(token) = request.token {
            req = req.header(GIRDER_TOKEN, token.as_str());
        }
        if let Some((username, password)) = request.basic_auth {
            req = req.basic_auth(username, Some(password));
        }
        req
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, request: &GetRequest<'_>) -> Result<RawResponse, IsicError> {
        let res = self.request(request).send()?;
        let status = res.status();
        let body = res.bytes()?;
        Ok(RawResponse { status, body })
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &GetRequest<'_>) -> Result<RawResponse, IsicError> {
        (**self).get(request)
    }
}
