use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Persists the bearer token across restarts.
///
/// The token lives in `~/.marquee/session` with 0600 permissions so only
/// the owner can read it.
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        let file_path = home_dir.join(".marquee").join("session");
        Ok(Self { file_path })
    }

    /// Load the stored token.
    ///
    /// Returns `Ok(None)` when no session file exists or its contents do
    /// not look like a token (empty, absurd length, control characters);
    /// a corrupted file is treated as being logged out rather than an error.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path).context("Failed to read session file")?;
        let token = content.trim();

        if token.is_empty() {
            log::warn!("Session file is empty, treating as no session");
            return Ok(None);
        }

        if token.len() < 8 || token.len() > 512 {
            log::warn!(
                "Session token has invalid length {}, treating as corrupted",
                token.len()
            );
            return Ok(None);
        }

        if token.chars().any(|c| c.is_control()) {
            log::warn!("Session file contains control characters, treating as corrupted");
            return Ok(None);
        }

        log::debug!("Loaded session token from {}", self.file_path.display());
        Ok(Some(token.to_string()))
    }

    /// Save the token atomically (temp file + rename) with 0600 permissions.
    /// Stale siblings (a `session.tmp` left by an interrupted save, old
    /// backups) are swept first.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).context("Failed to create .marquee directory")?;
        }

        self.cleanup_stale_files()?;

        let temp_path = self.file_path.with_extension("tmp");

        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary session file")?;
        file.write_all(token.as_bytes())
            .context("Failed to write session token")?;
        file.sync_all()
            .context("Failed to sync session file to disk")?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, permissions)
                .context("Failed to set session file permissions")?;
        }

        fs::rename(&temp_path, &self.file_path)
            .context("Failed to rename temporary session file")?;

        log::info!("Saved session token to {}", self.file_path.display());
        Ok(())
    }

    /// Remove leftover `session.*` files next to the session file. A crash
    /// between write and rename would otherwise leave a `session.tmp`
    /// holding a token forever.
    fn cleanup_stale_files(&self) -> Result<()> {
        let Some(parent) = self.file_path.parent() else {
            return Ok(());
        };
        if !parent.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(parent).context("Failed to read .marquee directory")? {
            let path = entry.context("Failed to read directory entry")?.path();
            if path == self.file_path {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with("session") {
                    log::debug!("Removing stale session file: {}", path.display());
                    if let Err(e) = fs::remove_file(&path) {
                        log::warn!("Failed to remove stale file {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(())
    }

    /// Delete the session file. Succeeds even when none exists.
    pub fn delete(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).context("Failed to delete session file")?;
            log::info!("Deleted session file at {}", self.file_path.display());
        }
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> SessionStore {
        let file_path = temp_dir.path().join("session");
        SessionStore { file_path }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        let token = "bearer-token-12345";
        store.save(token).unwrap();

        assert_eq!(store.load().unwrap(), Some(token.to_string()));
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.save("bearer-token-12345").unwrap();
        assert!(store.file_path.exists());

        store.delete().unwrap();
        assert!(!store.file_path.exists());

        // Deleting again should not error.
        store.delete().unwrap();
    }

    #[test]
    fn test_empty_or_whitespace_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        fs::write(&store.file_path, "").unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::write(&store.file_path, "   \n\t  ").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_invalid_token_length() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        fs::write(&store.file_path, "short").unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::write(&store.file_path, "a".repeat(600)).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupted_file_with_control_chars() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        fs::write(&store.file_path, b"token\x00with\x01control\x02chars").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_sweeps_stale_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        fs::write(temp_dir.path().join("session.tmp"), "interrupted-token").unwrap();
        fs::write(temp_dir.path().join("session.bak"), "old-token").unwrap();
        fs::write(temp_dir.path().join("session.old"), "older-token").unwrap();

        store.save("bearer-token-12345").unwrap();

        assert!(!temp_dir.path().join("session.tmp").exists());
        assert!(!temp_dir.path().join("session.bak").exists());
        assert!(!temp_dir.path().join("session.old").exists());
        assert_eq!(store.load().unwrap(), Some("bearer-token-12345".to_string()));
    }

    #[test]
    #[cfg(unix)]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.save("bearer-token-12345").unwrap();

        let metadata = fs::metadata(&store.file_path).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }
}
