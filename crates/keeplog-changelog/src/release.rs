//! Release engine
//!
//! Promotes the Unreleased section to a concrete version and opens a fresh,
//! empty Unreleased section in front of it, rewriting compare links on the
//! way.

use std::sync::LazyLock;

use keeplog_core::ChangelogError;
use regex::Regex;
use tracing::{debug, info, instrument};

use crate::types::{Changelog, Version, UNRELEASED};

/// Placeholder substituted by the version name in a tag format
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Revision range at the end of a compare link, e.g. `abcdef...HEAD`
static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w[\w.]*?)\.{2,3}(\w[\w.]*?)$").expect("Invalid regex"));

/// Parameters of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Name of the new version
    pub version: String,
    /// Release date, already formatted
    pub date: String,
    /// Explicit link for the new Unreleased section. Any `<prev>` token is
    /// replaced by the new tag and any `<next>` token by `HEAD`; a link
    /// without tokens is used verbatim.
    pub compare_url: Option<String>,
    /// Maps a version name to the tag used in compare links
    pub tag_format: String,
}

impl ReleaseRequest {
    /// Create a request for the given version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: String::new(),
            compare_url: None,
            tag_format: VERSION_PLACEHOLDER.to_string(),
        }
    }

    /// Set the release date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set an explicit compare link, optionally with `<prev>`/`<next>` tokens
    pub fn with_compare_url(mut self, template: impl Into<String>) -> Self {
        self.compare_url = Some(template.into());
        self
    }

    /// Set the tag format
    pub fn with_tag_format(mut self, format: impl Into<String>) -> Self {
        self.tag_format = format.into();
        self
    }

    /// Tag used in links for a version name
    pub fn tag(&self, name: &str) -> String {
        self.tag_format.replace(VERSION_PLACEHOLDER, name)
    }

    fn template(&self) -> Option<&str> {
        self.compare_url
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

impl Changelog {
    /// Release the Unreleased section as `request.version`.
    ///
    /// Returns the released version. Its change lists are kept untouched.
    #[instrument(skip(self, request), fields(version = %request.version))]
    pub fn release(&mut self, request: &ReleaseRequest) -> Result<&Version, ChangelogError> {
        if !request.tag_format.contains(VERSION_PLACEHOLDER) {
            return Err(ChangelogError::InvalidTagFormat(request.tag_format.clone()));
        }

        let idx = self
            .position(UNRELEASED)
            .ok_or(ChangelogError::UnreleasedNotFound)?;
        let prev = self.versions.get(idx + 1);
        let new_tag = request.tag(&request.version);
        let old_link = &self.versions[idx].link;

        let link = if let Some(template) = request.template() {
            debug!(template, "using explicit compare link");
            template.replace("<prev>", &new_tag).replace("<next>", "HEAD")
        } else {
            let prev = prev.ok_or(ChangelogError::CompareLinkNotInferred)?;
            if prev.link.is_empty() {
                detect_range(old_link, &new_tag)?
            } else {
                debug!(prev = %prev.name, "deriving compare link from previous version");
                old_link.replace(&request.tag(&prev.name), &new_tag)
            }
        };

        if link.is_empty() {
            return Err(ChangelogError::CompareLinkNotInferred);
        }

        let released = &mut self.versions[idx];
        released.link = released.link.replace("HEAD", &new_tag);
        released.name = request.version.clone();
        released.date = request.date.clone();

        self.versions
            .insert(idx, Version::new(UNRELEASED).with_link(link));

        info!(version = %request.version, date = %request.date, "version released");
        Ok(&self.versions[idx + 1])
    }
}

/// Replace the left revision of a trailing `old..HEAD` range
fn detect_range(link: &str, new_tag: &str) -> Result<String, ChangelogError> {
    let caps = RANGE_REGEX
        .captures(link)
        .ok_or(ChangelogError::CompareLinkNotInferred)?;
    let left = caps.get(1).ok_or(ChangelogError::CompareLinkNotInferred)?;
    debug!(revision = left.as_str(), "detected compare range");

    let mut detected = String::with_capacity(link.len() + new_tag.len());
    detected.push_str(&link[..left.start()]);
    detected.push_str(new_tag);
    detected.push_str(&link[left.end()..]);
    Ok(detected)
}
