use clap::ValueEnum;

pub mod commands;
pub mod session;

pub use session::Session;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}
