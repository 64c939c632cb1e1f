//! keeplog Changelog - Keep a Changelog documents as data
//!
//! This crate parses Markdown changelogs into a structured model, mutates
//! them (new entries, releases, fragment bundling) and renders them back as
//! canonical Markdown or JSON.

pub mod bundle;
pub mod formatter;
pub mod markdown;
pub mod parser;
pub mod release;
pub mod types;

pub use bundle::{bundle_dir, bundle_files_in, BundleSummary};
pub use formatter::{render, ChangelogFormatter, FormatterRegistry, JsonFormatter, MarkdownFormatter};
pub use parser::{parse, parse_bytes};
pub use release::ReleaseRequest;
pub use types::{ChangeList, ChangeType, Changelog, Item, Version, UNRELEASED};
