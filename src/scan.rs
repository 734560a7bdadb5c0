//! Memory dump discovery in a directory (non-recursive).

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files in `dir` with the given extension, sorted by path
pub fn find_dumps(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut dumps = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            dumps.push(entry.into_path());
        }
    }
    dumps.sort();
    Ok(dumps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.dmp", "a.dmp", "notes.txt", "c.dmp.csv"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("d.dmp")).unwrap();
        std::fs::write(dir.path().join("d.dmp").join("nested.dmp"), b"x").unwrap();

        let found = find_dumps(dir.path(), "dmp").unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.dmp", "b.dmp"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(find_dumps(Path::new("/nonexistent/memdump-dir"), "dmp").is_err());
    }
}
