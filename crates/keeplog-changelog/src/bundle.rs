//! Fragment bundling
//!
//! Fragments are Markdown files stored under `<root>/<change type>/*.md`, one
//! entry per line. Bundling folds them into the Unreleased section.

use std::fs;
use std::path::{Path, PathBuf};

use keeplog_core::ChangelogError;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::types::{ChangeType, Changelog};

/// Result of a bundling run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSummary {
    /// Fragment files read
    pub files: usize,
    /// Entries added to Unreleased
    pub items: usize,
}

/// List fragment files below `root` with the change type of their directory,
/// sorted by path
pub fn bundle_files_in(root: &Path) -> Result<Vec<(ChangeType, PathBuf)>, ChangelogError> {
    if !root.is_dir() {
        return Err(ChangelogError::FragmentDirNotFound(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() != 1 || !entry.file_type().is_dir() || dir_change_type(entry.path()).is_some()
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ChangelogError::Io(e.into()))?;
        if entry.depth() != 2 || !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(change_type) = entry.path().parent().and_then(dir_change_type) else {
            continue;
        };
        files.push((change_type, entry.into_path()));
    }

    Ok(files)
}

/// Add every fragment below `root` to the Unreleased section
#[instrument(skip(changelog), fields(root = %root.display()))]
pub fn bundle_dir(root: &Path, changelog: &mut Changelog) -> Result<BundleSummary, ChangelogError> {
    let mut summary = BundleSummary::default();

    for (change_type, path) in bundle_files_in(root)? {
        let content = fs::read_to_string(&path)?;
        for line in content.lines() {
            let entry = line.trim_start_matches(['-', ' ']).trim_end();
            if entry.is_empty() {
                continue;
            }
            changelog.add_item(change_type, entry);
            summary.items += 1;
        }
        debug!(path = %path.display(), %change_type, "fragment bundled");
        summary.files += 1;
    }

    Ok(summary)
}

fn dir_change_type(path: &Path) -> Option<ChangeType> {
    path.file_name()?.to_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNRELEASED;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn descriptions(changelog: &Changelog, change_type: ChangeType) -> Vec<String> {
        changelog
            .version(UNRELEASED)
            .and_then(|v| v.change_list(change_type))
            .map(|l| l.items.iter().map(|i| i.description.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_bundle_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "added/b.md", "- Second feature\n");
        write(temp.path(), "added/a.md", "- First feature\n\n- Another one\n");
        write(temp.path(), "Fixed/bug.md", "A bug fix\n");

        let mut changelog = Changelog::new();
        let summary = bundle_dir(temp.path(), &mut changelog).unwrap();

        assert_eq!(summary, BundleSummary { files: 3, items: 4 });
        assert_eq!(
            descriptions(&changelog, ChangeType::Added),
            vec!["First feature", "Another one", "Second feature"]
        );
        assert_eq!(descriptions(&changelog, ChangeType::Fixed), vec!["A bug fix"]);
    }

    #[test]
    fn test_bundle_skips_unrelated_entries() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "notes/a.md", "- Not a change\n");
        write(temp.path(), "README.md", "- Top level file\n");
        write(temp.path(), "removed/a.txt", "- Wrong extension\n");
        write(temp.path(), "removed/nested/a.md", "- Too deep\n");

        let mut changelog = Changelog::new();
        let summary = bundle_dir(temp.path(), &mut changelog).unwrap();

        assert_eq!(summary, BundleSummary::default());
        assert!(changelog.versions.is_empty());
    }

    #[test]
    fn test_bundle_files_in_lists_types() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "security/cve.md", "- Patched\n");
        write(temp.path(), "deprecated/old.md", "- Old API\n");

        let files = bundle_files_in(temp.path()).unwrap();
        let types: Vec<_> = files.iter().map(|(t, _)| *t).collect();
        assert_eq!(types, vec![ChangeType::Deprecated, ChangeType::Security]);
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("changelog-unreleased");

        let err = bundle_dir(&missing, &mut Changelog::new()).unwrap_err();
        assert!(matches!(err, ChangelogError::FragmentDirNotFound(p) if p == missing));
    }
}
