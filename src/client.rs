use clap::Args;
use color_eyre::eyre::{Context, Result};
use isic::Session;

/// Command-line options of `isics` which are relevant to connecting to the archive.
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// Archive address
    #[clap(long, global = true, env = "ISIC_HOSTNAME")]
    pub hostname: Option<String>,

    /// Account username
    #[clap(long, global = true, env = "ISIC_USERNAME")]
    pub username: Option<String>,

    /// Account password. Asked for if a username is given without a password.
    #[clap(long, global = true, env = "ISIC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Credentials {
    /// Connect to the archive, logging in if a username was given.
    pub fn get_session(&self) -> Result<Session> {
        let hostname = self.hostname.as_deref().unwrap_or(isic::DEFAULT_HOSTNAME);
        Session::new(
            self.hostname.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        )
        .wrap_err_with(|| format!("Could not connect to {}", hostname))
    }
}
