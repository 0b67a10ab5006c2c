use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Token in a URL template that is replaced by the encoded query
pub const PLACEHOLDER: &str = "[query]";

/// A search provider template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(rename = "urlTemplate")]
    pub url_template: String,
    pub joiner: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl Provider {
    /// Providers seeded on first run when nothing has been saved yet
    pub fn defaults() -> Vec<Provider> {
        vec![
            Provider {
                id: "1".to_string(),
                name: "Google".to_string(),
                url_template: format!("https://google.com/search?q={}", PLACEHOLDER),
                joiner: "+".to_string(),
                enabled: true,
                group: None,
            },
            Provider {
                id: "2".to_string(),
                name: "Reddit".to_string(),
                url_template: format!("https://reddit.com/search?q={}", PLACEHOLDER),
                joiner: "+".to_string(),
                enabled: true,
                group: None,
            },
        ]
    }

    /// Host portion of the template, used as a short label
    pub fn host(&self) -> &str {
        self.url_template
            .split('/')
            .nth(2)
            .filter(|h| !h.is_empty())
            .unwrap_or(self.name.as_str())
    }
}

/// Fields supplied when creating a provider
#[derive(Debug, Clone)]
pub struct NewProvider {
    pub name: String,
    pub url_template: String,
    pub joiner: String,
    pub group: Option<String>,
}

impl NewProvider {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        joiner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            joiner: joiner.into(),
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Check the fields in the order a user fills them in
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_template(&self.url_template)?;
        if self.joiner.is_empty() {
            return Err(Error::Validation("Joiner is required".to_string()));
        }
        Ok(())
    }
}

/// Field-level edit of an existing provider. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProviderPatch {
    pub name: Option<String>,
    pub url_template: Option<String>,
    pub joiner: Option<String>,
    pub enabled: Option<bool>,
    /// An empty string clears the group
    pub group: Option<String>,
}

impl ProviderPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url_template.is_none()
            && self.joiner.is_none()
            && self.enabled.is_none()
            && self.group.is_none()
    }

    pub(crate) fn apply(&self, provider: &mut Provider) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(template) = &self.url_template {
            validate_template(template)?;
        }

        if let Some(name) = &self.name {
            provider.name = name.clone();
        }
        if let Some(template) = &self.url_template {
            provider.url_template = template.clone();
        }
        if let Some(joiner) = &self.joiner {
            provider.joiner = joiner.clone();
        }
        if let Some(enabled) = self.enabled {
            provider.enabled = enabled;
        }
        if let Some(group) = &self.group {
            provider.group = if group.is_empty() {
                None
            } else {
                Some(group.clone())
            };
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Provider name is required".to_string()));
    }
    Ok(())
}

fn validate_template(template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::Validation("URL template is required".to_string()));
    }
    if !template.contains(PLACEHOLDER) {
        return Err(Error::Validation(format!(
            "URL template must contain the {} placeholder",
            PLACEHOLDER
        )));
    }
    Ok(())
}
