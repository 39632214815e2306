/// Archive which is used when no hostname is given.
pub const DEFAULT_HOSTNAME: &str = "https://isic-archive.com";

pub(crate) const AUTHENTICATION_ENDPOINT: &str = "user/authentication";

/// Collection name of studies.
pub const STUDY_COLLECTION: &str = "study";

/// Collection name of images.
pub const IMAGE_COLLECTION: &str = "image";

/// Largest number which fits in an `ISIC_nnnnnnn` image name.
pub const MAX_IMAGE_NUMBER: i64 = 9_999_999;
