use crate::print::{print_json, print_listing};
use clap::Args;
use color_eyre::eyre::{Context, Result};
use isic::{Download, Fetched, ResourceRef, Session, Transport};
use std::path::Path;

/// How an image is given on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ImageArg {
    /// Image name or ID, e.g. ISIC_0000000
    pub image: Option<String>,

    /// Image number, e.g. 7 for ISIC_0000007
    #[clap(short, long, conflicts_with = "image", allow_negative_numbers = true)]
    pub number: Option<i64>,
}

impl ImageArg {
    /// Resolve `--number` to an ID. Names are left for the library to resolve.
    pub fn into_ref<T: Transport>(self, session: &mut Session<T>) -> Result<ResourceRef> {
        match self.number {
            Some(number) => {
                let id = session
                    .resolve_image_id_by_number(number)
                    .wrap_err_with(|| format!("Could not find image number {}", number))?;
                Ok(ResourceRef::Id(id))
            }
            None => Ok(self.image.into()),
        }
    }
}

/// `isics image` command.
pub fn image(session: &mut Session, image: ImageArg) -> Result<()> {
    let image = image.into_ref(session)?;
    match session.get_image(image).wrap_err("Could not get image")? {
        Fetched::Item(item) => print_json(&item),
        Fetched::Listing(listing) => print_listing(listing),
    }
}

/// `isics image-id` command.
pub fn image_id(session: &mut Session, image: ImageArg) -> Result<()> {
    let image = image.into_ref(session)?;
    let id = session.resolve_image(image).wrap_err("Could not resolve image")?;
    println!("{}", id);
    Ok(())
}

/// `isics download` command.
pub fn download(session: &mut Session, image: ImageArg, dst: &Path) -> Result<()> {
    let image = image.into_ref(session)?;
    let download = session
        .download_image(image, dst)
        .wrap_err_with(|| format!("Could not download image to {:?}", dst))?;
    if let Download::Saved { path, size } = download {
        log::info!("Saved {} bytes to {:?}", size, path);
    }
    Ok(())
}
