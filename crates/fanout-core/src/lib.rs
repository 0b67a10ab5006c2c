pub mod error;
pub mod provider;
pub mod query;
pub mod store;

pub use error::{Error, Result};
pub use provider::{NewProvider, PLACEHOLDER, Provider, ProviderList, ProviderPatch};
pub use query::{LaunchRequest, expand, is_blank, plan};
pub use store::ProviderStore;
