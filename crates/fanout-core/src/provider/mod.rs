mod list;
mod types;

pub use list::ProviderList;
pub use types::*;
