pub mod browsers;
pub mod completion;
pub mod legacy;
pub mod providers;
pub mod search;
