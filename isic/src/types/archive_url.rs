//! NewType for the base URL of the archive API.

use crate::errors::InvalidArchiveUrl;
use aliri_braid::braid;

const API_PATH: &str = "/api/v1";

/// An [ArchiveUrl] is the base URL of an ISIC Archive API, e.g.
/// `https://isic-archive.com/api/v1/`
#[braid(validator, serde)]
pub struct ArchiveUrl(String);

impl aliri_braid::Validator for ArchiveUrl {
    type Error = InvalidArchiveUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        let rest = s
            .strip_prefix("https://")
            .or_else(|| s.strip_prefix("http://"))
            .ok_or_else(|| InvalidArchiveUrl::Protocol(s.to_string()))?;
        let host = rest
            .strip_suffix("/api/v1/")
            .ok_or_else(|| InvalidArchiveUrl::EndpointVersion(s.to_string()))?;
        if host.is_empty() {
            Err(InvalidArchiveUrl::Host(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl ArchiveUrl {
    /// Get the API URL of the archive served at `hostname`, e.g.
    /// `https://isic-archive.com` becomes `https://isic-archive.com/api/v1/`.
    /// A hostname which already ends with `/api/v1` is taken as-is.
    pub fn from_hostname(hostname: &str) -> Result<Self, InvalidArchiveUrl> {
        let host = hostname.trim_end_matches('/');
        let host = host.strip_suffix(API_PATH).unwrap_or(host);
        Self::new(format!("{}{}/", host, API_PATH))
    }

    /// Append an endpoint path to this base URL. Exactly one `/` separates the two.
    pub fn join(&self, endpoint: &str) -> String {
        format!("{}{}", self.as_str(), endpoint.trim_start_matches('/'))
    }
}
