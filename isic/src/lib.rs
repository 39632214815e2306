//! Client library for the [ISIC Archive](https://isic-archive.com) API.
//!
//! ```no_run
//! use isic::Session;
//!
//! let mut session = Session::new(None, Some("me@example.org"), Some("hunter2"))?;
//! let study = session.get_study("Melanoma Study")?;
//! let image_id = session.resolve_image_id_by_number(7)?;
//! session.download_image(image_id, "ISIC_0000007.jpg".as_ref())?;
//! # Ok::<(), isic::IsicError>(())
//! ```

mod constants;
pub mod errors;
mod listing;
mod models;
mod prompt;
mod resolve;
mod session;
pub mod transport;
pub mod types;

pub use constants::{DEFAULT_HOSTNAME, IMAGE_COLLECTION, MAX_IMAGE_NUMBER, STUDY_COLLECTION};
pub use errors::IsicError;
pub use listing::{Fetched, Listing};
pub use models::{ImageSummary, ResourceRef, StudySummary};
pub use reqwest;
pub use resolve::isic_image_name;
pub use session::{Download, Session, SessionBuilder};
pub use transport::{ReqwestTransport, Transport};
pub use types::is_valid_identifier;
