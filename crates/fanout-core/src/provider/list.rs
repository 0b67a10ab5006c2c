use super::types::{NewProvider, Provider, ProviderPatch};
use crate::{Error, Result};
use std::collections::HashSet;

/// Ordered, editable list of providers
///
/// Edits happen in memory; persisting the list is up to the caller
/// (see [`crate::ProviderStore::save`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderList {
    providers: Vec<Provider>,
}

impl ProviderList {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn as_slice(&self) -> &[Provider] {
        &self.providers
    }

    pub fn into_vec(self) -> Vec<Provider> {
        self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    /// Providers that take part in a search, in stored order
    pub fn enabled(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter().filter(|p| p.enabled)
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Validate and append a new provider, minting its id
    pub fn add(&mut self, new: NewProvider) -> Result<&Provider> {
        new.validate()?;

        let id = self.mint_id(chrono::Utc::now().timestamp_millis());
        tracing::debug!("Adding provider '{}' with id {}", new.name, id);

        self.providers.push(Provider {
            id,
            name: new.name,
            url_template: new.url_template,
            joiner: new.joiner,
            enabled: true,
            group: new.group,
        });

        Ok(&self.providers[self.providers.len() - 1])
    }

    /// Apply a field-level edit to the provider with the given id
    pub fn update(&mut self, id: &str, patch: &ProviderPatch) -> Result<&Provider> {
        let provider = self
            .providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        patch.apply(provider)?;
        tracing::debug!("Updated provider {}", id);

        Ok(&*provider)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<&Provider> {
        self.update(
            id,
            &ProviderPatch {
                enabled: Some(enabled),
                ..Default::default()
            },
        )
    }

    pub fn toggle(&mut self, id: &str) -> Result<&Provider> {
        let enabled = self
            .get(id)
            .map(|p| p.enabled)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        self.set_enabled(id, !enabled)
    }

    /// Remove exactly the provider with the given id
    pub fn delete(&mut self, id: &str) -> Result<Provider> {
        let index = self
            .providers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        tracing::debug!("Deleting provider {}", id);
        Ok(self.providers.remove(index))
    }

    /// Move the provider at `from` to `to` (both zero-based)
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.providers.len();
        for position in [from, to] {
            if position >= len {
                return Err(Error::InvalidPosition { position, len });
            }
        }

        let provider = self.providers.remove(from);
        self.providers.insert(to, provider);
        Ok(())
    }

    /// Append providers whose id is not already present. Returns how many were added.
    pub fn merge(&mut self, incoming: Vec<Provider>) -> usize {
        let mut seen: HashSet<String> = self.providers.iter().map(|p| p.id.clone()).collect();
        let mut added = 0;

        for provider in incoming {
            if seen.insert(provider.id.clone()) {
                self.providers.push(provider);
                added += 1;
            } else {
                tracing::debug!("Skipping provider {} - id already present", provider.id);
            }
        }

        added
    }

    fn mint_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl From<Vec<Provider>> for ProviderList {
    fn from(providers: Vec<Provider>) -> Self {
        Self::new(providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProviderList {
        let mut list = ProviderList::new(Provider::defaults());
        list.merge(vec![Provider {
            id: "3".to_string(),
            name: "Wikipedia".to_string(),
            url_template: "https://en.wikipedia.org/w/index.php?search=[query]".to_string(),
            joiner: "+".to_string(),
            enabled: false,
            group: None,
        }]);
        list
    }

    fn ids(list: &ProviderList) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_add_mints_unique_ids() {
        let mut list = ProviderList::default();

        let first = list
            .add(NewProvider::new("A", "https://a.test/?q=[query]", "+"))
            .unwrap()
            .id
            .clone();
        let second = list
            .add(NewProvider::new("B", "https://b.test/?q=[query]", "+"))
            .unwrap()
            .id
            .clone();

        assert_ne!(first, second);
        assert!(list.iter().all(|p| p.enabled));
    }

    #[test]
    fn test_mint_id_skips_taken_values() {
        let mut list = ProviderList::default();
        list.merge(vec![Provider {
            id: "1000".to_string(),
            ..Provider::defaults().remove(0)
        }]);

        assert_eq!(list.mint_id(1000), "1001");
        assert_eq!(list.mint_id(42), "42");
    }

    #[test]
    fn test_add_rejects_invalid_provider() {
        let mut list = sample();
        let result = list.add(NewProvider::new("Broken", "https://broken.test/", "+"));

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_delete_removes_exactly_one_and_keeps_order() {
        let mut list = sample();
        let removed = list.delete("2").unwrap();

        assert_eq!(removed.name, "Reddit");
        assert_eq!(ids(&list), vec!["1", "3"]);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut list = sample();
        assert!(matches!(list.delete("nope"), Err(Error::NotFound(_))));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_reorder_moves_one_record() {
        let mut list = sample();
        list.reorder(2, 0).unwrap();
        assert_eq!(ids(&list), vec!["3", "1", "2"]);

        list.reorder(0, 2).unwrap();
        assert_eq!(ids(&list), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let mut list = sample();
        let err = list.reorder(0, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { position: 3, len: 3 }));
    }

    #[test]
    fn test_update_revalidates_template() {
        let mut list = sample();
        let patch = ProviderPatch {
            url_template: Some("https://google.com/".to_string()),
            ..Default::default()
        };

        assert!(list.update("1", &patch).is_err());
        assert_eq!(
            list.get("1").unwrap().url_template,
            "https://google.com/search?q=[query]"
        );
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut list = sample();
        let patch = ProviderPatch {
            joiner: Some("%20".to_string()),
            ..Default::default()
        };
        let updated = list.update("2", &patch).unwrap();

        assert_eq!(updated.joiner, "%20");
        assert_eq!(updated.name, "Reddit");
    }

    #[test]
    fn test_toggle_and_enabled_filter() {
        let mut list = sample();
        list.toggle("3").unwrap();
        list.set_enabled("1", false).unwrap();

        let enabled: Vec<&str> = list.enabled().map(|p| p.id.as_str()).collect();
        assert_eq!(enabled, vec!["2", "3"]);
    }

    #[test]
    fn test_merge_skips_existing_ids() {
        let mut list = sample();
        let added = list.merge(Provider::defaults());

        assert_eq!(added, 0);
        assert_eq!(list.len(), 3);
    }
}
