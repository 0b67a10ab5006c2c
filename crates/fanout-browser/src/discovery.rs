//! Installed browser discovery.
//!
//! Discovery checks a fixed list of install locations for the host platform
//! and reports the ones that exist. It never fails: an unreadable or missing
//! path just means "not installed". The first entry is always the
//! [`SYSTEM_DEFAULT`] sentinel, which opens URLs with the OS default handler.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Display name of the entry that defers to the OS default handler
pub const SYSTEM_DEFAULT: &str = "System Default";

/// A target that URLs can be opened with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Browser {
    pub name: String,
    /// Executable path, empty for the system default handler
    pub path: String,
}

impl Browser {
    pub fn system_default() -> Self {
        Self {
            name: SYSTEM_DEFAULT.to_string(),
            path: String::new(),
        }
    }

    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn is_system_default(&self) -> bool {
        self.path.is_empty()
    }

    pub fn executable(&self) -> Option<&Path> {
        if self.is_system_default() {
            None
        } else {
            Some(Path::new(&self.path))
        }
    }
}

/// Platform-specific knowledge of where browsers live and what they are called
pub trait DiscoveryStrategy {
    /// Candidate executable paths in priority order
    fn candidates(&self) -> Vec<PathBuf>;

    /// Product name for a recognized executable
    fn product_name(&self, path: &Path) -> Option<String>;
}

/// Strategy for platforms without known install locations
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl DiscoveryStrategy for Unsupported {
    fn candidates(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn product_name(&self, _path: &Path) -> Option<String> {
        None
    }
}

/// Install locations under the Windows program and per-user app directories
#[derive(Debug, Default, Clone)]
pub struct WindowsStrategy {
    local_app_data: Option<PathBuf>,
    program_files: Option<PathBuf>,
    program_files_x86: Option<PathBuf>,
}

impl WindowsStrategy {
    /// Read the roots from `LOCALAPPDATA`, `ProgramFiles` and `ProgramFiles(x86)`
    pub fn from_env() -> Self {
        Self {
            local_app_data: env_dir("LOCALAPPDATA"),
            program_files: env_dir("ProgramFiles"),
            program_files_x86: env_dir("ProgramFiles(x86)"),
        }
    }

    pub fn with_roots(
        local_app_data: Option<PathBuf>,
        program_files: Option<PathBuf>,
        program_files_x86: Option<PathBuf>,
    ) -> Self {
        Self {
            local_app_data,
            program_files,
            program_files_x86,
        }
    }
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn under(root: &Option<PathBuf>, parts: &[&str]) -> Option<PathBuf> {
    let mut path = root.clone()?;
    for part in parts {
        path.push(part);
    }
    Some(path)
}

impl DiscoveryStrategy for WindowsStrategy {
    fn candidates(&self) -> Vec<PathBuf> {
        let local = &self.local_app_data;
        let pf = &self.program_files;
        let pf86 = &self.program_files_x86;

        const EDGE: &[&str] = &["Microsoft", "Edge", "Application", "msedge.exe"];
        const CHROME: &[&str] = &["Google", "Chrome", "Application", "chrome.exe"];
        const FIREFOX: &[&str] = &["Mozilla Firefox", "firefox.exe"];
        const BRAVE: &[&str] = &["BraveSoftware", "Brave-Browser", "Application", "brave.exe"];
        const VIVALDI: &[&str] = &["Vivaldi", "Application", "vivaldi.exe"];

        [
            under(pf, EDGE),
            under(pf86, EDGE),
            // Per-user Chrome installs take precedence over machine-wide ones
            under(local, CHROME),
            under(pf, CHROME),
            under(pf86, CHROME),
            under(pf, FIREFOX),
            under(pf86, FIREFOX),
            under(pf, BRAVE),
            under(pf86, BRAVE),
            under(local, BRAVE),
            under(pf, &["Opera", "opera.exe"]),
            under(local, &["Programs", "Opera", "opera.exe"]),
            under(local, &["Programs", "Opera GX", "opera.exe"]),
            under(pf, VIVALDI),
            under(pf86, VIVALDI),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn product_name(&self, path: &Path) -> Option<String> {
        let base = path.file_name()?.to_string_lossy().to_lowercase();

        let name = match base.as_str() {
            "msedge.exe" => "Microsoft Edge",
            "chrome.exe" => "Google Chrome",
            "firefox.exe" => "Mozilla Firefox",
            "brave.exe" => "Brave",
            "opera.exe" if is_opera_gx(path) => "Opera GX",
            "opera.exe" => "Opera",
            "vivaldi.exe" => "Vivaldi",
            _ => return None,
        };

        Some(name.to_string())
    }
}

fn is_opera_gx(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_string_lossy().eq_ignore_ascii_case("opera gx"))
}

/// Locates installed browsers using a platform strategy
pub struct BrowserFinder {
    strategy: Box<dyn DiscoveryStrategy>,
}

impl BrowserFinder {
    /// Pick the strategy for the platform this binary runs on
    pub fn for_host() -> Self {
        #[cfg(target_os = "windows")]
        return Self::with_strategy(WindowsStrategy::from_env());

        #[cfg(not(target_os = "windows"))]
        return Self::with_strategy(Unsupported);
    }

    pub fn with_strategy(strategy: impl DiscoveryStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// The sentinel followed by every installed candidate, deduplicated by path
    pub fn discover(&self) -> Vec<Browser> {
        let mut browsers = vec![Browser::system_default()];
        let mut seen = HashSet::new();

        for candidate in self.strategy.candidates() {
            let path = candidate.to_string_lossy().into_owned();
            if seen.contains(&path) || !candidate.exists() {
                continue;
            }
            seen.insert(path.clone());

            let name = self
                .strategy
                .product_name(&candidate)
                .unwrap_or_else(|| fallback_name(&candidate));

            tracing::debug!("Found {} at {}", name, path);
            browsers.push(Browser { name, path });
        }

        browsers
    }
}

impl Default for BrowserFinder {
    fn default() -> Self {
        Self::for_host()
    }
}

fn fallback_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| path.to_string_lossy().to_lowercase())
}

/// Discover browsers on this host
pub fn get_browsers() -> Vec<Browser> {
    BrowserFinder::for_host().discover()
}

/// Look up a browser by display name (case-insensitive) or exact path
pub fn find_browser<'a>(browsers: &'a [Browser], query: &str) -> Option<&'a Browser> {
    browsers
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(query))
        .or_else(|| browsers.iter().find(|b| !b.path.is_empty() && b.path == query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn install(root: &Path, parts: &[&str]) -> PathBuf {
        let mut path = root.to_path_buf();
        for part in parts {
            path.push(part);
        }
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    struct FixedList(Vec<PathBuf>);

    impl DiscoveryStrategy for FixedList {
        fn candidates(&self) -> Vec<PathBuf> {
            self.0.clone()
        }

        fn product_name(&self, _path: &Path) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_nothing_installed_returns_only_sentinel() {
        let temp = tempfile::tempdir().unwrap();
        let strategy = WindowsStrategy::with_roots(
            Some(temp.path().join("local")),
            Some(temp.path().join("pf")),
            Some(temp.path().join("pf86")),
        );

        let browsers = BrowserFinder::with_strategy(strategy).discover();

        assert_eq!(browsers, vec![Browser::system_default()]);
    }

    #[test]
    fn test_unsupported_platform_returns_only_sentinel() {
        let browsers = BrowserFinder::with_strategy(Unsupported).discover();

        assert_eq!(browsers.len(), 1);
        assert_eq!(browsers[0].name, SYSTEM_DEFAULT);
        assert!(browsers[0].is_system_default());
    }

    #[test]
    fn test_finds_browsers_in_priority_order() {
        let temp = tempfile::tempdir().unwrap();
        let local = temp.path().join("local");
        let pf = temp.path().join("pf");

        install(&pf, &["Vivaldi", "Application", "vivaldi.exe"]);
        install(&pf, &["Mozilla Firefox", "firefox.exe"]);
        install(&local, &["Programs", "Opera GX", "opera.exe"]);
        install(&pf, &["Opera", "opera.exe"]);
        install(&pf, &["Microsoft", "Edge", "Application", "msedge.exe"]);

        let strategy = WindowsStrategy::with_roots(Some(local), Some(pf), None);
        let names: Vec<String> = BrowserFinder::with_strategy(strategy)
            .discover()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(
            names,
            vec![
                SYSTEM_DEFAULT,
                "Microsoft Edge",
                "Mozilla Firefox",
                "Opera",
                "Opera GX",
                "Vivaldi"
            ]
        );
    }

    #[test]
    fn test_per_user_chrome_wins() {
        let temp = tempfile::tempdir().unwrap();
        let local = temp.path().join("local");
        let pf = temp.path().join("pf");

        let user_chrome = install(&local, &["Google", "Chrome", "Application", "chrome.exe"]);
        install(&pf, &["Google", "Chrome", "Application", "chrome.exe"]);

        let strategy = WindowsStrategy::with_roots(Some(local), Some(pf), None);
        let browsers = BrowserFinder::with_strategy(strategy).discover();

        assert_eq!(browsers.len(), 3);
        assert_eq!(browsers[1].name, "Google Chrome");
        assert_eq!(browsers[1].path, user_chrome.to_string_lossy());
    }

    #[test]
    fn test_same_path_from_two_roots_appears_once() {
        let temp = tempfile::tempdir().unwrap();
        let pf = temp.path().join("pf");
        let edge = install(&pf, &["Microsoft", "Edge", "Application", "msedge.exe"]);

        // Both program-file roots resolve to the same directory
        let strategy = WindowsStrategy::with_roots(None, Some(pf.clone()), Some(pf));
        let browsers = BrowserFinder::with_strategy(strategy).discover();

        assert_eq!(browsers.len(), 2);
        assert_eq!(browsers[1].path, edge.to_string_lossy());
    }

    #[test]
    fn test_unrecognized_executable_uses_lowercase_file_name() {
        let temp = tempfile::tempdir().unwrap();
        let custom = install(temp.path(), &["Custom", "MyBrowser.EXE"]);

        let browsers =
            BrowserFinder::with_strategy(FixedList(vec![custom.clone(), custom])).discover();

        assert_eq!(browsers.len(), 2);
        assert_eq!(browsers[1].name, "mybrowser.exe");
    }

    #[test]
    fn test_product_names_ignore_case() {
        let strategy = WindowsStrategy::default();

        assert_eq!(
            strategy.product_name(Path::new("C:/x/MSEDGE.EXE")).as_deref(),
            Some("Microsoft Edge")
        );
        assert_eq!(
            strategy
                .product_name(Path::new("/apps/Programs/opera gx/Opera.exe"))
                .as_deref(),
            Some("Opera GX")
        );
        assert_eq!(strategy.product_name(Path::new("/apps/other.exe")), None);
    }

    #[test]
    fn test_missing_roots_contribute_no_candidates() {
        assert!(WindowsStrategy::default().candidates().is_empty());

        let only_local = WindowsStrategy::with_roots(Some(PathBuf::from("L")), None, None);
        assert_eq!(only_local.candidates().len(), 4);
    }

    #[test]
    fn test_find_browser_by_name_or_path() {
        let browsers = vec![
            Browser::system_default(),
            Browser::new("Mozilla Firefox", "/opt/firefox/firefox.exe"),
        ];

        assert_eq!(
            find_browser(&browsers, "mozilla firefox").unwrap().path,
            "/opt/firefox/firefox.exe"
        );
        assert_eq!(
            find_browser(&browsers, "/opt/firefox/firefox.exe").unwrap().name,
            "Mozilla Firefox"
        );
        assert!(find_browser(&browsers, "system default").unwrap().is_system_default());
        assert!(find_browser(&browsers, "").is_none());
        assert!(find_browser(&browsers, "lynx").is_none());
    }
}
