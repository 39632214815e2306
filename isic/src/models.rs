//! Shapes of archive API responses, as far as this crate cares about them.

use crate::types::{AuthToken, ImageName, ObjectId, StudyName};
use serde::Deserialize;
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Deserialize)]
pub(crate) struct AuthResponse {
    #[serde(rename = "authToken")]
    pub auth_token: Option<TokenObject>,
}

#[derive(Deserialize)]
pub(crate) struct TokenObject {
    pub token: AuthToken,
}

/// Body of an error response from Girder.
#[derive(Deserialize)]
pub(crate) struct ErrorMessage {
    pub message: String,
}

/// An item of the `study` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudySummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: StudyName,
}

/// An item of the `image` listing, also what a search by name finds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: ImageName,
}

/// How a caller refers to a study or image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// Document ID, used as-is.
    Id(ObjectId),
    /// Human-readable name, which must be resolved to an ID.
    Name(String),
    /// Nothing in particular, i.e. "all of them".
    Unspecified,
}

impl ResourceRef {
    /// A string which looks like an ID is an [ResourceRef::Id],
    /// anything else is a [ResourceRef::Name].
    pub fn parse(s: &str) -> Self {
        match ObjectId::try_from(s) {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(s.to_string()),
        }
    }

    pub fn is_id(&self) -> bool {
        matches!(self, Self::Id(_))
    }
}

impl FromStr for ResourceRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ResourceRef {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for ResourceRef {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ObjectId> for ResourceRef {
    fn from(id: ObjectId) -> Self {
        Self::Id(id)
    }
}

impl<T: Into<ResourceRef>> From<Option<T>> for ResourceRef {
    fn from(s: Option<T>) -> Self {
        s.map(Into::into).unwrap_or(Self::Unspecified)
    }
}
