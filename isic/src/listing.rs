//! Lazy listing of collection endpoints.

use crate::errors::IsicError;
use crate::session::Session;
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Records of one list endpoint response, produced one at a time.
///
/// A [Listing] is created by exactly one HTTP GET. Iterating over it never
/// makes further requests, and each record is deserialized only when it is
/// reached. It can't be restarted: to list again, make a new request.
pub struct Listing<R = Value> {
    records: std::vec::IntoIter<Value>,
    phantom: PhantomData<fn() -> R>,
}

impl<R: DeserializeOwned> Listing<R> {
    pub(crate) fn new(records: Vec<Value>) -> Self {
        Self {
            records: records.into_iter(),
            phantom: Default::default(),
        }
    }
}

impl<R: DeserializeOwned> Iterator for Listing<R> {
    type Item = Result<R, IsicError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| serde_json::from_value(record).map_err(IsicError::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl<R> fmt::Debug for Listing<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listing")
            .field("remaining", &self.records.len())
            .finish()
    }
}

impl<R: DeserializeOwned> ExactSizeIterator for Listing<R> {}

impl<R: DeserializeOwned> FusedIterator for Listing<R> {}

/// What [Session::get_endpoint] and friends return: either one record,
/// or all records of a collection.
#[derive(Debug)]
pub enum Fetched {
    Item(Value),
    Listing(Listing),
}

impl Fetched {
    pub fn into_item(self) -> Option<Value> {
        match self {
            Fetched::Item(v) => Some(v),
            Fetched::Listing(_) => None,
        }
    }

    pub fn into_listing(self) -> Option<Listing> {
        match self {
            Fetched::Item(_) => None,
            Fetched::Listing(l) => Some(l),
        }
    }
}

impl<T: Transport> Session<T> {
    /// GET a list endpoint, producing its records lazily.
    ///
    /// Only one page is fetched, i.e. whatever the endpoint returns without
    /// a `limit` or `offset`.
    pub fn list_endpoint<R: DeserializeOwned>(&self, endpoint: &str) -> Result<Listing<R>, IsicError> {
        let body: Value = self.get_json(endpoint)?;
        match body {
            Value::Array(records) => Ok(Listing::new(records)),
            other => Err(IsicError::UnexpectedResponse(format!(
                "expected a list from \"{}\", got: {}",
                endpoint, other
            ))),
        }
    }

    /// Without `id`, list all records of the collection. With `id`, get that
    /// one record. The `id` is sent as-is, errors about it come from the archive.
    pub fn get_endpoint(&self, collection: &str, id: Option<&str>) -> Result<Fetched, IsicError> {
        let endpoint = format!("/{}", collection);
        match id {
            None => self.list_endpoint(&endpoint).map(Fetched::Listing),
            Some(id) => self
                .get_json(&format!("{}/{}", endpoint, id))
                .map(Fetched::Item),
        }
    }
}
