//! State owned by one run of the CLI.
//!
//! The session holds the provider store, the in-memory provider list and the
//! browsers found on this host. Commands get it passed in; the library crates
//! only ever see the explicit values they need.

use anyhow::{Result, anyhow};
use fanout_browser::{Browser, BrowserFinder, find_browser};
use fanout_core::{Provider, ProviderList, ProviderStore};
use std::path::{Path, PathBuf};

pub struct Session {
    store: ProviderStore,
    providers: ProviderList,
    browsers: Option<Vec<Browser>>,
    /// Why the provider file could not be read; saving is refused while set
    load_error: Option<String>,
}

impl Session {
    /// Load providers from `data_dir`, or the platform data directory when
    /// none is given. An empty store is seeded with the default providers.
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => ProviderStore::default_data_dir().map_err(|e| {
                anyhow!("{}. Pass --data-dir or set FANOUT_DATA_DIR to choose one.", e)
            })?,
        };

        let mut store = ProviderStore::in_data_dir(&data_dir);
        if let Some(legacy) = ProviderStore::default_legacy_path() {
            store = store.with_legacy_path(legacy);
        }

        Self::with_store(store)
    }

    pub fn with_store(store: ProviderStore) -> Result<Self> {
        let mut load_error = None;
        let providers = match store.try_load() {
            Ok(providers) if !providers.is_empty() => providers,
            Ok(_) => {
                tracing::info!("No saved providers, starting with defaults");
                let defaults = Provider::defaults();
                store.save(&defaults)?;
                defaults
            }
            Err(e) => {
                // Keep the unreadable file around so it can be repaired by hand
                tracing::warn!(
                    "Could not read {}: {}. Using default providers without saving.",
                    store.path().display(),
                    e
                );
                load_error = Some(e.to_string());
                Provider::defaults()
            }
        };

        Ok(Self {
            store,
            providers: ProviderList::new(providers),
            browsers: None,
            load_error,
        })
    }

    pub fn store(&self) -> &ProviderStore {
        &self.store
    }

    pub fn providers(&self) -> &ProviderList {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut ProviderList {
        &mut self.providers
    }

    /// Write the whole provider list back to the store.
    ///
    /// Fails without writing when the file could not be read at startup.
    pub fn save(&self) -> Result<()> {
        if let Some(error) = &self.load_error {
            return Err(anyhow!(
                "Refusing to overwrite unreadable provider file {} ({}). \
                 Repair or move it, then try again.",
                self.store.path().display(),
                error
            ));
        }

        self.store.save(self.providers.as_slice())?;
        Ok(())
    }

    /// Browsers installed on this host, discovered on first use
    pub fn browsers(&mut self) -> &[Browser] {
        self.browsers
            .get_or_insert_with(|| BrowserFinder::for_host().discover())
    }

    /// Turn a `--browser` value into a launch target.
    ///
    /// Accepts a detected browser's name, a path to an executable, or a
    /// program name on `PATH`. No value selects the system default.
    pub fn resolve_browser(&mut self, selection: Option<&str>) -> Result<Browser> {
        let selection = match selection.map(str::trim) {
            None | Some("") => return Ok(Browser::system_default()),
            Some(s) => s,
        };

        if let Some(browser) = find_browser(self.browsers(), selection) {
            return Ok(browser.clone());
        }

        let path = Path::new(selection);
        if path.components().count() > 1 || path.exists() {
            // Launching reports a missing executable for each request
            return Ok(Browser::new(display_name(path), selection));
        }

        match which::which(selection) {
            Ok(found) => Ok(Browser::new(
                display_name(&found),
                found.to_string_lossy().into_owned(),
            )),
            Err(_) => Err(anyhow!(
                "Browser '{}' not found. Run 'fanout browsers' to list detected browsers.",
                selection
            )),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| path.display().to_string())
}
