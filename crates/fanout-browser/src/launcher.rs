use crate::discovery::Browser;
use crate::{Error, Result};
use fanout_core::LaunchRequest;
use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};
use url::Url;

/// Starts the process that shows a URL
pub trait Opener {
    /// Open with the OS default handler
    fn open_default(&self, url: &str) -> std::io::Result<()>;

    /// Start `browser` with `url` as its only argument
    fn open_with(&self, browser: &Path, url: &str) -> std::io::Result<()>;
}

/// Opens URLs by starting real, detached processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open_default(&self, url: &str) -> std::io::Result<()> {
        open::that_detached(url)
    }

    fn open_with(&self, browser: &Path, url: &str) -> std::io::Result<()> {
        let mut command = Command::new(browser);
        command
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        // The child is never waited on
        command.spawn().map(drop)
    }
}

/// Result of one launch request
#[derive(Debug, Clone, Serialize)]
pub struct LaunchOutcome {
    pub request: LaunchRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Validates URLs and hands them to an [`Opener`]
pub struct Launcher<O: Opener = SystemOpener> {
    opener: O,
}

impl Launcher<SystemOpener> {
    pub fn system() -> Self {
        Self::new(SystemOpener)
    }
}

impl Default for Launcher<SystemOpener> {
    fn default() -> Self {
        Self::system()
    }
}

impl<O: Opener> Launcher<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    /// Open one URL. An empty `browser_path` means the OS default handler.
    pub fn launch(&self, url: &str, browser_path: &str) -> Result<()> {
        validate_url(url)?;

        if browser_path.is_empty() {
            tracing::debug!("Opening with default handler: {}", url);
            return self
                .opener
                .open_default(url)
                .map_err(|e| Error::Launch(format!("default handler failed for {}: {}", url, e)));
        }

        let browser = Path::new(browser_path);
        if !browser.exists() {
            return Err(Error::BrowserNotFound(browser.to_path_buf()));
        }

        tracing::info!("Launching: {} {}", browser.display(), url);
        self.opener
            .open_with(browser, url)
            .map_err(|e| Error::Launch(format!("{}: {}", browser.display(), e)))
    }

    /// Launch every request independently; a failure does not stop the rest
    pub fn dispatch(&self, requests: &[LaunchRequest], browser: &Browser) -> Vec<LaunchOutcome> {
        requests
            .iter()
            .map(|request| {
                let error = match self.launch(&request.url, &browser.path) {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::error!("{}: {}", request.provider_name, e);
                        Some(e.to_string())
                    }
                };
                LaunchOutcome {
                    request: request.clone(),
                    error,
                }
            })
            .collect()
    }
}

/// Only the scheme is checked. URLs the parser rejects (a space in the host,
/// an out-of-range port) are still handed to the browser when they start
/// with `http://` or `https://`.
fn validate_url(url: &str) -> Result<()> {
    let allowed = match Url::parse(url) {
        Ok(parsed) => is_http(parsed.scheme()),
        Err(_) => url
            .split_once(':')
            .is_some_and(|(scheme, rest)| is_http(scheme) && rest.starts_with("//")),
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::InvalidUrl(url.to_string()))
    }
}

fn is_http(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

/// Open a URL, reporting success as a boolean instead of an error
pub fn open_url(url: &str, browser_path: &str) -> bool {
    match Launcher::system().launch(url, browser_path) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}
