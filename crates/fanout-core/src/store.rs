use crate::provider::Provider;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "sites.json";
const APP_DIR: &str = "fanout";

/// Reads and writes the provider list as a JSON array
///
/// Every save replaces the whole file. There is no locking: the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct ProviderStore {
    path: PathBuf,
    legacy_path: Option<PathBuf>,
}

impl ProviderStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            legacy_path: None,
        }
    }

    /// Store `sites.json` inside the given directory
    pub fn in_data_dir(dir: &Path) -> Self {
        Self::new(dir.join(FILE_NAME))
    }

    /// Store in the platform's per-user data directory
    pub fn default_location() -> Result<Self> {
        Ok(Self::in_data_dir(&Self::default_data_dir()?))
    }

    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(Error::NoDataDir)
    }

    /// Legacy `sites.json` kept two levels above the executable's directory
    pub fn default_legacy_path() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        let bin_dir = exe.parent()?;
        Some(bin_dir.join("..").join("..").join(FILE_NAME))
    }

    pub fn with_legacy_path(mut self, path: PathBuf) -> Self {
        self.legacy_path = Some(path);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn legacy_path(&self) -> Option<&Path> {
        self.legacy_path.as_deref()
    }

    /// Load the saved providers, treating any failure as "nothing saved"
    pub fn load(&self) -> Vec<Provider> {
        match self.try_load() {
            Ok(providers) => providers,
            Err(e) => {
                tracing::warn!("Ignoring provider file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Load the saved providers. A missing file is an empty list.
    pub fn try_load(&self) -> Result<Vec<Provider>> {
        if !self.path.exists() {
            tracing::debug!("No provider file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let providers = read_providers(&self.path)?;
        tracing::debug!(
            "Loaded {} providers from {}",
            providers.len(),
            self.path.display()
        );
        Ok(providers)
    }

    /// Replace the file contents with the given providers
    pub fn save(&self, providers: &[Provider]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let temp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, providers)?;
            writer.flush()?;
        }
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::info!(
            "Saved {} providers to {}",
            providers.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read providers from the legacy file, if there is one and it parses
    pub fn load_legacy(&self) -> Option<Vec<Provider>> {
        let path = self.legacy_path.as_deref()?;
        tracing::debug!("Checking legacy path: {}", path.display());

        if !path.exists() {
            return None;
        }

        match read_providers(path) {
            Ok(providers) => Some(providers),
            Err(e) => {
                tracing::warn!("Failed to parse legacy providers: {}", e);
                None
            }
        }
    }
}

fn read_providers(path: &Path) -> Result<Vec<Provider>> {
    let file = File::open(path)?;
    let providers: Vec<Provider> = serde_json::from_reader(BufReader::new(file))?;
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::in_data_dir(dir.path());

        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::in_data_dir(&dir.path().join("nested"));

        let mut providers = Provider::defaults();
        providers[1].enabled = false;
        providers[0].group = Some("web".to_string());
        providers.reverse();

        store.save(&providers).unwrap();
        let loaded = store.load();

        assert_eq!(loaded, providers);
    }

    #[test]
    fn test_save_writes_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::in_data_dir(dir.path());

        store.save(&Provider::defaults()).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();

        assert!(content.starts_with('['));
        assert!(content.contains("\n  {\n"));
        assert!(content.contains("\"urlTemplate\": \"https://reddit.com/search?q=[query]\""));
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::in_data_dir(dir.path());

        store.save(&Provider::defaults()).unwrap();
        store.save(&Provider::defaults()[..1]).unwrap();

        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::in_data_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_legacy_absent_or_corrupt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("legacy.json");
        let store = ProviderStore::in_data_dir(dir.path()).with_legacy_path(legacy.clone());

        assert_eq!(store.load_legacy(), None);

        fs::write(&legacy, "[{\"id\": 1}]").unwrap();
        assert_eq!(store.load_legacy(), None);

        assert_eq!(ProviderStore::in_data_dir(dir.path()).load_legacy(), None);
    }

    #[test]
    fn test_legacy_records_load() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("legacy.json");
        fs::write(
            &legacy,
            r#"[{"id":"9","name":"GitHub","urlTemplate":"https://github.com/search?q=[query]","joiner":"+"}]"#,
        )
        .unwrap();

        let store = ProviderStore::in_data_dir(dir.path()).with_legacy_path(legacy);
        let providers = store.load_legacy().unwrap();

        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "GitHub");
        assert!(providers[0].enabled);
    }
}
