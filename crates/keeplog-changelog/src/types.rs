//! Changelog document model

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the section holding changes that were not released yet
pub const UNRELEASED: &str = "Unreleased";

/// Preamble written by [`Changelog::with_defaults`]
pub const DEFAULT_PREAMBLE: &str = "All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/)
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).";

/// Kind of change grouped under a version.
///
/// The declaration order is the render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// New features
    Added,
    /// Changes in existing functionality
    Changed,
    /// Soon-to-be removed features
    Deprecated,
    /// Bug fixes
    Fixed,
    /// Removed features
    Removed,
    /// Vulnerability fixes
    Security,
    /// Anything else
    Unknown,
}

impl ChangeType {
    /// The six canonical change types, in render order
    pub const ALL: [ChangeType; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Fixed,
        Self::Removed,
        Self::Security,
    ];

    /// Heading title for this type
    pub fn title(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Fixed => "Fixed",
            Self::Removed => "Removed",
            Self::Security => "Security",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = ();

    /// Case-insensitive match against the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ct| ct.title().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// A single changelog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Literal Markdown text of the entry
    pub description: String,
}

impl Item {
    /// Create a new item
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Items of one change type within a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeList {
    /// Change type of every item in the list
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    /// Entries in document order
    pub items: Vec<Item>,
}

impl ChangeList {
    /// Create an empty list
    pub fn new(change_type: ChangeType) -> Self {
        Self {
            change_type,
            items: Vec::new(),
        }
    }

    /// Append an item
    pub fn push(&mut self, description: impl Into<String>) {
        self.items.push(Item::new(description));
    }
}

/// A version section of the changelog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Version name, compared case-insensitively
    pub name: String,
    /// Release date (`YYYY-MM-DD`) or empty
    pub date: String,
    /// Compare URL or empty
    pub link: String,
    /// Whether the release was withdrawn
    pub yanked: bool,
    /// Change lists, at most one per type
    pub changes: Vec<ChangeList>,
}

impl Version {
    /// Create a version with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the release date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the compare link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Mark the version as yanked
    pub fn yanked(mut self) -> Self {
        self.yanked = true;
        self
    }

    /// Check if this is the Unreleased section
    pub fn is_unreleased(&self) -> bool {
        self.name.eq_ignore_ascii_case(UNRELEASED)
    }

    /// Find the change list of the given type
    pub fn change_list(&self, change_type: ChangeType) -> Option<&ChangeList> {
        self.changes.iter().find(|c| c.change_type == change_type)
    }

    /// Find the change list of the given type or append an empty one
    pub fn change_list_or_insert(&mut self, change_type: ChangeType) -> &mut ChangeList {
        let idx = match self.changes.iter().position(|c| c.change_type == change_type) {
            Some(idx) => idx,
            None => {
                self.changes.push(ChangeList::new(change_type));
                self.changes.len() - 1
            }
        };
        &mut self.changes[idx]
    }
}

/// A whole changelog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Free text between the title and the first version
    pub preamble: String,
    /// Versions, top of the file first
    pub versions: Vec<Version>,
}

impl Changelog {
    /// Create an empty changelog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the skeleton of a new changelog: the standard preamble and an
    /// Unreleased section linked to `compare_url`
    pub fn with_defaults(compare_url: impl Into<String>) -> Self {
        let mut added = ChangeList::new(ChangeType::Added);
        added.push("First commit");

        let mut unreleased = Version::new(UNRELEASED).with_link(compare_url);
        unreleased.changes.push(added);

        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            versions: vec![unreleased],
        }
    }

    /// Index of the version with the given name (case-insensitive)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.versions
            .iter()
            .position(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Find a version by name (case-insensitive)
    pub fn version(&self, name: &str) -> Option<&Version> {
        self.position(name).map(|idx| &self.versions[idx])
    }

    /// The topmost released version
    pub fn latest_release(&self) -> Option<&Version> {
        self.versions.iter().find(|v| !v.is_unreleased())
    }

    /// Add an entry under the Unreleased section, creating the section and
    /// the change list when needed
    pub fn add_item(&mut self, change_type: ChangeType, text: impl Into<String>) {
        let idx = match self.position(UNRELEASED) {
            Some(idx) => idx,
            None => {
                debug!("no Unreleased section, prepending one");
                self.versions.insert(0, Version::new(UNRELEASED));
                0
            }
        };

        self.versions[idx]
            .change_list_or_insert(change_type)
            .push(text);
    }
}
