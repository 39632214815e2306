use crate::print::{print_json, print_listing};
use color_eyre::eyre::{Context, Result};
use isic::{Fetched, ResourceRef, Session};
use itertools::Itertools;

/// `isics studies` command: print the name and ID of every study.
pub fn studies(session: &mut Session) -> Result<()> {
    let studies = session
        .load_all_studies()
        .wrap_err("Could not list studies")?;
    let sorted = studies
        .iter()
        .sorted_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
    for (name, id) in sorted {
        println!("{}\t{}", name, id);
    }
    Ok(())
}

/// `isics study` command.
pub fn study(session: &mut Session, study: Option<String>, first: bool) -> Result<()> {
    if first {
        let study = session.first_study().wrap_err("Could not get first study")?;
        return print_json(&study);
    }
    let study = ResourceRef::from(study);
    match session.get_study(study).wrap_err("Could not get study")? {
        Fetched::Item(item) => print_json(&item),
        Fetched::Listing(listing) => print_listing(listing),
    }
}
