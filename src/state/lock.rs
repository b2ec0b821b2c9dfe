use crate::error::{OpkError, Result};
use crate::project_identity;
use crate::ui;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const STALE_AFTER_SECONDS: u64 = 300;
const OPEN_ATTEMPTS: usize = 3;

/// Exclusive lock on a project directory, released and removed on drop
pub struct ProjectLock {
    _file: File,
    path: PathBuf,
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

impl ProjectLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Take `.opk.lock` in `project_dir`, failing fast if another opk holds it.
///
/// An existing file is locked where it is and then rewritten; it is never
/// removed and recreated, since a process still holding the old inode open
/// could otherwise lock a file nobody else can see.
pub fn acquire(project_dir: &Path) -> Result<ProjectLock> {
    let lock_path = project_dir.join(project_identity::PROJECT_LOCK_BASENAME);

    for _ in 0..OPEN_ATTEMPTS {
        let age_secs = fs::metadata(&lock_path)
            .ok()
            .and_then(|m| m.modified().ok())
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .map(|age| age.as_secs());

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| OpkError::io(&lock_path, e))?;

        if file.try_lock_exclusive().is_err() {
            return Err(held_elsewhere(project_dir, &lock_path));
        }

        // The previous holder removed the path between our open and lock
        if !is_current_file(&file, &lock_path) {
            ui::debug(&format!("{} was replaced while locking, retrying", lock_path.display()));
            continue;
        }

        if age_secs.is_some_and(|age| age > STALE_AFTER_SECONDS) {
            ui::warning("Reusing stale lock file (not actively locked)");
        }

        file.set_len(0).map_err(|e| OpkError::io(&lock_path, e))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| OpkError::io(&lock_path, e))?;
        let _ = writeln!(file, "{}", std::process::id());
        ui::debug(&format!("acquired {}", lock_path.display()));

        return Ok(ProjectLock {
            _file: file,
            path: lock_path,
        });
    }

    Err(held_elsewhere(project_dir, &lock_path))
}

fn held_elsewhere(project_dir: &Path, lock_path: &Path) -> OpkError {
    let holder = fs::read_to_string(lock_path)
        .ok()
        .map(|pid| pid.trim().to_string())
        .filter(|pid| !pid.is_empty())
        .map(|pid| format!(" (pid {})", pid))
        .unwrap_or_default();
    OpkError::LockError(format!(
        "another {} process is working in {}{}. Wait for it to finish, or delete {} if none is running",
        project_identity::BINARY_NAME,
        project_dir.display(),
        holder,
        lock_path.display()
    ))
}

/// Whether `path` still names the file behind `file`
#[cfg(unix)]
fn is_current_file(file: &File, path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (file.metadata(), fs::metadata(path)) {
        (Ok(open), Ok(named)) => open.dev() == named.dev() && open.ino() == named.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_current_file(_file: &File, path: &Path) -> bool {
    path.is_file()
}
