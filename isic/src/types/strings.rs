use aliri_braid::braid;

/// Human-readable image name, e.g. `ISIC_0000000`
#[braid(serde)]
pub struct ImageName;

/// Human-readable study name.
#[braid(serde)]
pub struct StudyName;

/// Girder authentication token, sent in the `Girder-Token` header.
#[braid(serde)]
pub struct AuthToken;
