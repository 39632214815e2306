use color_eyre::eyre::Result;
use isic::Listing;
use serde_json::Value;

/// Print a JSON value, indented.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print every record of a listing as one line of JSON.
pub fn print_listing(listing: Listing) -> Result<()> {
    for record in listing {
        println!("{}", serde_json::to_string(&record?)?);
    }
    Ok(())
}
