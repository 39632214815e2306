use crate::errors::InvalidObjectId;
use aliri_braid::braid;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OBJECT_ID_PATTERN: Regex = Regex::new(r"^[0-9a-f]{24}$").unwrap();
}

/// Returns `true` for strings which look like a MongoDB ObjectId, i.e.
/// exactly 24 lowercase hexadecimal characters.
///
/// The check is purely syntactic: a valid-looking identifier might not
/// exist in the archive.
pub fn is_valid_identifier(candidate: &str) -> bool {
    candidate.len() == 24 && OBJECT_ID_PATTERN.is_match(candidate)
}

/// Document ID assigned by the archive, e.g. `5436e3abbae478396759f0cf`
#[braid(validator, serde)]
pub struct ObjectId(String);

impl aliri_braid::Validator for ObjectId {
    type Error = InvalidObjectId;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if is_valid_identifier(s) {
            Ok(())
        } else {
            Err(InvalidObjectId(s.to_string()))
        }
    }
}
