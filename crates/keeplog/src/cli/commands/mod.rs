//! CLI commands

mod bundle;
mod completions;
mod entry;
mod fmt;
mod init;
mod latest;
mod release;
mod show;

pub use bundle::BundleCommand;
pub use completions::CompletionsCommand;
pub use entry::EntryCommand;
pub use fmt::FmtCommand;
pub use init::InitCommand;
pub use latest::LatestCommand;
pub use release::ReleaseCommand;
pub use show::ShowCommand;
