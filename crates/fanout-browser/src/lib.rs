mod discovery;
mod error;
mod launcher;

pub use discovery::{
    Browser, BrowserFinder, DiscoveryStrategy, SYSTEM_DEFAULT, Unsupported, WindowsStrategy,
    find_browser, get_browsers,
};
pub use error::{Error, Result};
pub use launcher::{LaunchOutcome, Launcher, Opener, SystemOpener, open_url};
