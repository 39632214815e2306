//! Resolution of human-readable names to [ObjectId], and fetching of
//! studies and images by whichever [ResourceRef] the caller has.

use crate::constants::{IMAGE_COLLECTION, MAX_IMAGE_NUMBER, STUDY_COLLECTION};
use crate::errors::IsicError;
use crate::listing::{Fetched, Listing};
use crate::models::{ImageSummary, ResourceRef, StudySummary};
use crate::session::{Download, Session};
use crate::transport::Transport;
use crate::types::{ImageName, ObjectId, StudyName};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Serialize)]
struct ImageNameQuery<'a> {
    details: bool,
    name: &'a str,
}

/// Name of the image with the given number, e.g. `7` is `ISIC_0000007`.
pub fn isic_image_name(number: u32) -> ImageName {
    ImageName::new(format!("ISIC_{:07}", number))
}

impl<T: Transport> Session<T> {
    /// Get the ID of an image by its name, e.g. `ISIC_0000000`.
    pub fn resolve_image_id_by_name(&mut self, name: &str) -> Result<ObjectId, IsicError> {
        if name.is_empty() {
            return Err(IsicError::InvalidArgument(
                "Image name must not be empty.".to_string(),
            ));
        }
        let key = ImageName::from(name);
        if let Some(id) = self.images.get(&key) {
            debug!("Image \"{}\" is {} (cached)", name, id);
            return Ok(id.clone());
        }
        let query = serde_urlencoded::to_string(ImageNameQuery {
            details: false,
            name,
        })
        .map_err(|e| IsicError::InvalidArgument(e.to_string()))?;
        let mut matches: Listing<ImageSummary> = self.list_endpoint(&format!("image?{}", query))?;
        let found = matches
            .next()
            .transpose()?
            .ok_or_else(|| IsicError::NotFound(format!("Image {}", name)))?;
        if found.name != key {
            debug!("Searched for \"{}\", archive matched \"{}\"", name, found.name);
        }
        Ok(self.images.entry(key).or_insert(found.id).clone())
    }

    /// Get the ID of an image by its number, e.g. `7` for `ISIC_0000007`.
    pub fn resolve_image_id_by_number(&mut self, number: i64) -> Result<ObjectId, IsicError> {
        if number < 0 {
            return Err(IsicError::InvalidArgument(
                "Requires an image number >= 0.".to_string(),
            ));
        }
        if number > MAX_IMAGE_NUMBER {
            return Err(IsicError::InvalidArgument(format!(
                "Requires an image number < {}",
                MAX_IMAGE_NUMBER + 1
            )));
        }
        // range is checked above
        let name = isic_image_name(number as u32);
        self.resolve_image_id_by_name(name.as_str())
    }

    /// Get the ID of an image, making a request only if given a name
    /// which has not been resolved before.
    pub fn resolve_image(&mut self, image: impl Into<ResourceRef>) -> Result<ObjectId, IsicError> {
        match image.into() {
            ResourceRef::Id(id) => Ok(id),
            ResourceRef::Name(name) => self.resolve_image_id_by_name(&name),
            ResourceRef::Unspecified => Err(IsicError::InvalidArgument(
                "Requires an image name or ID.".to_string(),
            )),
        }
    }

    /// Without a reference, list all images. Otherwise, get the details of one image.
    pub fn get_image(&mut self, image: impl Into<ResourceRef>) -> Result<Fetched, IsicError> {
        let id = match image.into() {
            ResourceRef::Unspecified => return self.get_endpoint(IMAGE_COLLECTION, None),
            ResourceRef::Id(id) => id,
            ResourceRef::Name(name) => self.resolve_image_id_by_name(&name)?,
        };
        self.get_endpoint(IMAGE_COLLECTION, Some(id.as_str()))
    }

    /// Download the full-resolution payload of an image to `destination`.
    pub fn download_image(
        &mut self,
        image: impl Into<ResourceRef>,
        destination: &Path,
    ) -> Result<Download, IsicError> {
        let id = self.resolve_image(image)?;
        self.get_file(&format!("image/{}/download", id), Some(destination))
    }

    /// Without a reference, list all studies. Otherwise, get the details of one study.
    ///
    /// A name is first resolved to an ID using [Session::resolve_study_id_by_name].
    pub fn get_study(&mut self, study: impl Into<ResourceRef>) -> Result<Fetched, IsicError> {
        let id = match study.into() {
            ResourceRef::Unspecified => return self.get_endpoint(STUDY_COLLECTION, None),
            ResourceRef::Id(id) => id,
            ResourceRef::Name(name) => self.resolve_study_id_by_name(&name)?,
        };
        self.get_json(&format!("study/{}", id)).map(Fetched::Item)
    }

    /// Get the details of whichever study the archive lists first.
    pub fn first_study(&self) -> Result<Value, IsicError> {
        let mut studies: Listing<StudySummary> = self.list_endpoint(STUDY_COLLECTION)?;
        let first = studies
            .next()
            .transpose()?
            .ok_or_else(|| IsicError::NotFound("First study".to_string()))?;
        self.get_json(&format!("study/{}", first.id))
    }

    /// Get the ID of a study by its name.
    ///
    /// All studies are loaded the first time this is called.
    pub fn resolve_study_id_by_name(&mut self, name: &str) -> Result<ObjectId, IsicError> {
        if name.is_empty() {
            return Err(IsicError::InvalidArgument(
                "Requires a study name.".to_string(),
            ));
        }
        if self.studies.is_empty() {
            self.load_all_studies()?;
        }
        self.studies
            .get(&StudyName::from(name))
            .cloned()
            .ok_or_else(|| IsicError::NotFound(format!("Study {}", name)))
    }

    /// Get the IDs of all studies by name. Only the first call which finds
    /// any studies makes a request, after that the mapping is remembered.
    ///
    /// Records without a name or a valid `_id` are skipped.
    pub fn load_all_studies(&mut self) -> Result<&HashMap<StudyName, ObjectId>, IsicError> {
        if self.studies.is_empty() {
            let listing = self.list_endpoint::<StudySummary>(STUDY_COLLECTION)?;
            let total = listing.len();
            for study in listing {
                match study {
                    Ok(study) => {
                        self.studies.entry(study.name).or_insert(study.id);
                    }
                    Err(e) => warn!("Skipping study record: {}", e),
                }
            }
            debug!("Loaded {} of {} studies", self.studies.len(), total);
        }
        Ok(&self.studies)
    }

    /// Annotations of a study. Not implemented yet.
    pub fn get_study_annotations(
        &mut self,
        _study: impl Into<ResourceRef>,
    ) -> Result<Value, IsicError> {
        Err(IsicError::NotImplemented("study annotations"))
    }
}
