mod archive_url;
mod ids;
/// Primitive ISIC Archive API data types and NewType-patterns.
mod strings;

pub use archive_url::*;
pub use ids::*;
pub use strings::*;
