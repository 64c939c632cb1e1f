//! File or standard stream I/O for changelog input and output

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Path that selects the standard streams
pub const STDIO: &str = "-";

/// Check if `path` selects stdin or stdout
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

/// Read all bytes from a file, or from stdin for `-`
pub fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    fs::read(path)
}

/// Write bytes to a file, or to stdout for `-`
pub fn write_output(path: &Path, content: &[u8]) -> io::Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        return stdout.flush();
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_stdio() {
        assert!(is_stdio(Path::new("-")));
        assert!(!is_stdio(Path::new("CHANGELOG.md")));
        assert!(!is_stdio(Path::new("./-")));
    }

    #[test]
    fn test_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        write_output(&path, b"# Changelog\n").unwrap();
        assert_eq!(read_input(&path).unwrap(), b"# Changelog\n");
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let err = read_input(&temp.path().join("missing.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
