//! A fake archive which answers from canned responses and records every request.

#![allow(dead_code)]

use bytes::Bytes;
use isic::reqwest::StatusCode;
use isic::transport::{GetRequest, RawResponse, Transport};
use isic::IsicError;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

pub const HOSTNAME: &str = "http://isic.test";
pub const BASE_URL: &str = "http://isic.test/api/v1/";

pub const STUDY_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";
pub const STUDY_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbb";
pub const IMAGE_7: &str = "5436e3abbae478396759f0cf";

/// A request as seen by [FakeArchive].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub url: String,
    pub token: Option<String>,
    pub basic_auth: Option<(String, String)>,
}

#[derive(Default)]
pub struct FakeArchive {
    routes: HashMap<String, RawResponse>,
    login: Option<(String, String, String)>,
    requests: RefCell<Vec<Recorded>>,
}

impl FakeArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `endpoint` (relative to [BASE_URL]) with JSON.
    pub fn with_json(self, endpoint: &str, body: Value) -> Self {
        self.with_response(endpoint, StatusCode::OK, body.to_string())
    }

    pub fn with_response(mut self, endpoint: &str, status: StatusCode, body: impl Into<Bytes>) -> Self {
        let url = format!("{}{}", BASE_URL, endpoint);
        self.routes.insert(url, RawResponse::new(status, body.into()));
        self
    }

    /// Accept exactly these credentials at `user/authentication`.
    pub fn with_login(mut self, username: &str, password: &str, token: &str) -> Self {
        self.login = Some((username.to_string(), password.to_string(), token.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }

    /// Number of requests made to `endpoint`.
    pub fn count(&self, endpoint: &str) -> usize {
        let url = format!("{}{}", BASE_URL, endpoint);
        self.requests.borrow().iter().filter(|r| r.url == url).count()
    }

    pub fn total(&self) -> usize {
        self.requests.borrow().len()
    }

    fn authenticate(&self, basic_auth: Option<(&str, &str)>) -> RawResponse {
        match (&self.login, basic_auth) {
            (Some((u, p, token)), Some((given_u, given_p))) if u == given_u && p == given_p => {
                let body = json!({"authToken": {"token": token, "expires": "2030-01-01"}});
                RawResponse::new(StatusCode::OK, body.to_string().into())
            }
            _ => {
                let body = json!({"message": "Login failed.", "type": "access"});
                RawResponse::new(StatusCode::UNAUTHORIZED, body.to_string().into())
            }
        }
    }
}

impl Transport for FakeArchive {
    fn get(&self, request: &GetRequest<'_>) -> Result<RawResponse, IsicError> {
        self.requests.borrow_mut().push(Recorded {
            url: request.url.to_string(),
            token: request.token.map(|t| t.to_string()),
            basic_auth: request
                .basic_auth
                .map(|(u, p)| (u.to_string(), p.to_string())),
        });
        if let Some(res) = self.routes.get(request.url) {
            return Ok(res.clone());
        }
        if request.url == format!("{}user/authentication", BASE_URL) {
            return Ok(self.authenticate(request.basic_auth));
        }
        let body = json!({"message": "Resource not found", "type": "rest"});
        Ok(RawResponse::new(StatusCode::NOT_FOUND, body.to_string().into()))
    }
}

/// A transport which fails every request the way a dropped connection would.
#[derive(Default)]
pub struct Unreachable {
    pub attempts: RefCell<usize>,
}

impl Transport for Unreachable {
    fn get(&self, _request: &GetRequest<'_>) -> Result<RawResponse, IsicError> {
        *self.attempts.borrow_mut() += 1;
        Err(IsicError::Transport(anyhow::anyhow!("connection refused")))
    }
}

/// The archive from the usual end-to-end scenario: two studies and one image.
pub fn two_studies() -> FakeArchive {
    FakeArchive::new()
        .with_json(
            "study",
            json!([
                {"_id": STUDY_A, "name": "S1"},
                {"_id": STUDY_B, "name": "S2"}
            ]),
        )
        .with_json(
            &format!("study/{}", STUDY_A),
            json!({"_id": STUDY_A, "name": "S1", "description": "first"}),
        )
        .with_json(
            &format!("study/{}", STUDY_B),
            json!({"_id": STUDY_B, "name": "S2", "description": "second"}),
        )
        .with_json(
            "image?details=false&name=ISIC_0000007",
            json!([{"_id": IMAGE_7, "name": "ISIC_0000007"}]),
        )
        .with_json("image?details=false&name=ISIC_9999999", json!([]))
        .with_json(
            &format!("image/{}", IMAGE_7),
            json!({"_id": IMAGE_7, "name": "ISIC_0000007", "meta": {"clinical": {}}}),
        )
        .with_response(
            &format!("image/{}/download", IMAGE_7),
            StatusCode::OK,
            Bytes::from_static(b"\xff\xd8\xff\xe0 not really a jpeg"),
        )
}
