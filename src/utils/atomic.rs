use crate::error::{OpkError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` through a sibling temp file and rename,
/// so readers never observe a partial write
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| OpkError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| OpkError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| OpkError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| OpkError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_file_and_leaves_no_temp() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("package.json");
        fs::write(&path, "old").expect("write");

        write_atomic(&path, "new\n").expect("atomic write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "new\n");
        let entries = fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(entries, 1);
    }
}
