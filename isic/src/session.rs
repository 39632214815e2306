use crate::constants::{AUTHENTICATION_ENDPOINT, DEFAULT_HOSTNAME};
use crate::errors::{check, IsicError};
use crate::models::{AuthResponse, ErrorMessage};
use crate::prompt::prompt_password;
use crate::transport::{GetRequest, RawResponse, ReqwestTransport, Transport};
use crate::types::{ArchiveUrl, AuthToken, ImageName, ObjectId, StudyName};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

type PasswordPrompt = Box<dyn FnOnce(&str) -> Result<String, IsicError>>;

/// A connection to the ISIC Archive API, optionally logged in.
///
/// Names which were resolved to IDs are remembered for as long as the
/// [Session] lives. Methods which might fill those caches take `&mut self`,
/// so a [Session] cannot be used from several threads at once without
/// the caller wrapping it in a lock.
pub struct Session<T: Transport = ReqwestTransport> {
    transport: T,
    base_url: ArchiveUrl,
    auth_token: Option<AuthToken>,
    pub(crate) images: HashMap<ImageName, ObjectId>,
    pub(crate) studies: HashMap<StudyName, ObjectId>,
}

/// Builder for [Session].
pub struct SessionBuilder<T: Transport> {
    transport: T,
    hostname: Option<String>,
    username: Option<String>,
    password: Option<String>,
    prompt: Option<PasswordPrompt>,
}

/// Outcome of [Session::get_file].
#[derive(Debug)]
pub enum Download {
    /// No destination was given, here is the response.
    Response(RawResponse),
    /// The response body was written to `path`.
    Saved { path: PathBuf, size: usize },
}

impl<T: Transport> SessionBuilder<T> {
    /// Archive to connect to, e.g. `https://isic-archive.com`
    pub fn hostname(self, hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ..self
        }
    }

    /// Log in as this user.
    pub fn username(self, username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..self
        }
    }

    /// Password of the user. If a username is given without a password,
    /// the password is asked for interactively.
    pub fn password(self, password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..self
        }
    }

    /// Replace the terminal prompt which asks for a missing password.
    /// The function is given the username.
    pub fn password_prompt<F>(self, prompt: F) -> Self
    where
        F: FnOnce(&str) -> Result<String, IsicError> + 'static,
    {
        Self {
            prompt: Some(Box::new(prompt)),
            ..self
        }
    }

    /// Create the [Session], logging in if a username was given.
    pub fn connect(self) -> Result<Session<T>, IsicError> {
        let hostname = self.hostname.as_deref().unwrap_or(DEFAULT_HOSTNAME);
        let base_url = ArchiveUrl::from_hostname(hostname)?;
        let mut session = Session {
            transport: self.transport,
            base_url,
            auth_token: None,
            images: HashMap::new(),
            studies: HashMap::new(),
        };
        if let Some(username) = self.username {
            let password = match (self.password, self.prompt) {
                (Some(password), _) => password,
                (None, Some(prompt)) => prompt(&username)?,
                (None, None) => prompt_password(&username)?,
            };
            session.login(&username, &password)?;
        }
        Ok(session)
    }
}

impl Session {
    /// Connect to the archive at `hostname` (or [DEFAULT_HOSTNAME]) over HTTP,
    /// logging in if `username` is given.
    pub fn new(
        hostname: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, IsicError> {
        let mut builder = Session::builder(ReqwestTransport::new()?);
        if let Some(hostname) = hostname {
            builder = builder.hostname(hostname);
        }
        if let Some(username) = username {
            builder = builder.username(username);
        }
        if let Some(password) = password {
            builder = builder.password(password);
        }
        builder.connect()
    }
}

impl<T: Transport> Session<T> {
    /// Create a session builder which makes its requests using `transport`.
    pub fn builder(transport: T) -> SessionBuilder<T> {
        SessionBuilder {
            transport,
            hostname: None,
            username: None,
            password: None,
            prompt: None,
        }
    }

    /// Get the API URL this session is connected to.
    pub fn base_url(&self) -> &ArchiveUrl {
        &self.base_url
    }

    /// Get the token obtained by logging in.
    pub fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    /// Exchange username and password for an authentication token, which is
    /// used for all subsequent requests.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&AuthToken, IsicError> {
        let url = self.base_url.join(AUTHENTICATION_ENDPOINT);
        let request = GetRequest {
            basic_auth: Some((username, password)),
            ..GetRequest::new(&url)
        };
        let res = self.transport.get(&request)?;
        if !res.is_success() {
            let message = res
                .json::<ErrorMessage>()
                .map(|e| e.message)
                .unwrap_or_else(|_| res.text());
            return Err(IsicError::Authentication { message });
        }
        let data: AuthResponse = res.json()?;
        let token = data.auth_token.map(|t| t.token).ok_or_else(|| {
            IsicError::UnexpectedResponse("login response has no authToken".to_string())
        })?;
        info!("Logged in to {} as \"{}\"", &self.base_url, username);
        let token: &AuthToken = self.auth_token.insert(token);
        Ok(token)
    }

    /// HTTP GET an endpoint, e.g. `study` or `/image/{id}`. A non-success
    /// status is not an error here, check it yourself.
    pub fn get(&self, endpoint: &str) -> Result<RawResponse, IsicError> {
        let url = self.base_url.join(endpoint);
        debug!("GET {}", url);
        let request = GetRequest {
            url: &url,
            token: self.auth_token.as_ref(),
            basic_auth: None,
        };
        self.transport.get(&request)
    }

    /// HTTP GET an endpoint and decode its JSON response.
    pub fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, IsicError> {
        let res = check(self.get(endpoint)?)?;
        Ok(res.json()?)
    }

    /// HTTP GET a file. Without `destination`, this is the same as [Session::get].
    ///
    /// With `destination`, the body is written there, replacing any existing
    /// file. Nothing is written if the archive responds with an error.
    pub fn get_file(&self, endpoint: &str, destination: Option<&Path>) -> Result<Download, IsicError> {
        let res = self.get(endpoint)?;
        let path = match destination {
            None => return Ok(Download::Response(res)),
            Some(p) => p,
        };
        let res = check(res).map_err(|e| {
            warn!("Not writing to {:?} because of error response", path);
            e
        })?;
        fs_err::write(path, &res.body)?;
        debug!("Wrote {} bytes to {:?}", res.body.len(), path);
        Ok(Download::Saved {
            path: path.to_path_buf(),
            size: res.body.len(),
        })
    }

    /// Image names resolved so far.
    pub fn cached_image_ids(&self) -> &HashMap<ImageName, ObjectId> {
        &self.images
    }

    /// Study names resolved so far.
    pub fn cached_study_ids(&self) -> &HashMap<StudyName, ObjectId> {
        &self.studies
    }
}

impl<T: Transport> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .field("images", &self.images.len())
            .field("studies", &self.studies.len())
            .finish()
    }
}
