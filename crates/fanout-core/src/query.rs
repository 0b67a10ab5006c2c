//! Query expansion.
//!
//! Turns one user query into one URL per enabled provider. A query is trimmed,
//! split on whitespace, and each word is percent-encoded on its own before
//! being joined with the provider's joiner. The joiner itself is inserted
//! verbatim, so `"rust async"` with joiner `+` becomes `rust+async`.

use crate::provider::{PLACEHOLDER, Provider};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Characters left untouched when encoding a single URI component
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A URL to open for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchRequest {
    pub provider_id: String,
    pub provider_name: String,
    pub url: String,
}

/// Whitespace, plus the byte-order mark that pasted text sometimes carries
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// True when the query has no words to search for
pub fn is_blank(query: &str) -> bool {
    query.chars().all(is_separator)
}

/// Encode the query words and join them with `joiner`.
///
/// Returns `None` when the query has no words.
pub fn encode_query(query: &str, joiner: &str) -> Option<String> {
    let words: Vec<String> = query
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .map(|word| utf8_percent_encode(word, COMPONENT).to_string())
        .collect();

    if words.is_empty() {
        return None;
    }

    Some(words.join(joiner))
}

/// Build the URL for a single provider.
///
/// Only the first placeholder in the template is substituted. A template
/// without a placeholder is returned unchanged.
pub fn expand(query: &str, provider: &Provider) -> Option<String> {
    let encoded = encode_query(query, &provider.joiner)?;
    Some(provider.url_template.replacen(PLACEHOLDER, &encoded, 1))
}

/// One launch request per enabled provider, in list order.
///
/// A blank query yields no requests.
pub fn plan<'a>(
    query: &str,
    providers: impl IntoIterator<Item = &'a Provider>,
) -> Vec<LaunchRequest> {
    if is_blank(query) {
        tracing::debug!("Ignoring blank query");
        return Vec::new();
    }

    providers
        .into_iter()
        .filter(|p| p.enabled)
        .filter_map(|p| {
            let url = expand(query, p)?;
            tracing::debug!("{} -> {}", p.name, url);
            Some(LaunchRequest {
                provider_id: p.id.clone(),
                provider_name: p.name.clone(),
                url,
            })
        })
        .collect()
}
