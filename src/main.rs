mod client;
mod images;
mod print;
mod studies;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use serde_json::Value;

use crate::client::Credentials;
use crate::images::ImageArg;

#[derive(Parser)]
#[clap(
    author, version, about, long_about = None,
    propagate_version = false, disable_help_subcommand = true
)]
struct Cli {
    #[clap(flatten)]
    credentials: Credentials,

    /// Print debugging messages
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the names and IDs of all studies
    Studies,

    /// Show a study. Without a study, show all studies.
    Study {
        /// Study name or ID
        #[clap(conflicts_with = "first")]
        study: Option<String>,

        /// Show whichever study is listed first
        #[clap(long)]
        first: bool,
    },

    /// Show an image. Without an image, show all images.
    Image {
        #[clap(flatten)]
        image: ImageArg,
    },

    /// Print the ID of an image
    ImageId {
        #[clap(flatten)]
        image: ImageArg,
    },

    /// Download an image
    Download {
        #[clap(flatten)]
        image: ImageArg,

        /// Where to save the image
        #[clap(short, long)]
        output: PathBuf,
    },

    /// Print the JSON response of any API endpoint, e.g. "study" or "image/{id}"
    Get {
        endpoint: String,
    },
}

fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Cli = Cli::parse();
    init_logger(args.verbose);

    let mut session = args.credentials.get_session()?;
    match args.command {
        Commands::Studies => studies::studies(&mut session),
        Commands::Study { study, first } => studies::study(&mut session, study, first),
        Commands::Image { image } => images::image(&mut session, image),
        Commands::ImageId { image } => images::image_id(&mut session, image),
        Commands::Download { image, output } => images::download(&mut session, image, &output),
        Commands::Get { endpoint } => {
            let value: Value = session
                .get_json(&endpoint)
                .wrap_err_with(|| format!("Could not get {}", endpoint))?;
            print::print_json(&value)
        }
    }
}
