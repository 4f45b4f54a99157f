//! Writing and removing the credential file

use crate::config::CredentialFileConfig;
use crate::credentials::Credentials;
use crate::error::{CredentialFileError, Result};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Handle on the credential file at a configured destination
///
/// There is no locking: two renders against the same destination race and the
/// last rename wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    /// Handle on the file named by `config`, after validating it
    pub fn new(config: &CredentialFileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: config.destination.clone(),
        })
    }

    /// Handle on an arbitrary path, without validation
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render `credentials` as JSON and replace the file with it
    ///
    /// Any existing file is overwritten.
    pub fn render(&self, credentials: &Credentials) -> Result<()> {
        let bytes = to_json(credentials)?;
        atomic_write(&self.path, &bytes)
            .map_err(|e| CredentialFileError::file_create(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            cloud = %credentials.cloud(),
            "wrote credential file"
        );
        Ok(())
    }

    /// Remove the file; succeeds when it is already gone
    pub fn delete(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed credential file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialFileError::file_delete(&self.path, e)),
        }
    }
}

impl Default for CredentialFile {
    fn default() -> Self {
        Self::at(CredentialFileConfig::default().destination)
    }
}

/// Serialize with four-space indentation and a trailing newline
fn to_json(credentials: &Credentials) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    credentials.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `data` beside `path` and rename it into place
///
/// On Unix the file is created owner read/write only. The temporary file is
/// removed if anything after its creation fails.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = path.with_file_name(format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("azure.json"),
        Uuid::new_v4()
    ));

    let result = write_private(&temp_path, data).and_then(|()| std::fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::AzureCloud;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Credentials {
        Credentials::new(
            AzureCloud::Public,
            "t1".into(),
            "s1".into(),
            "c1".into(),
            "x1".into(),
            "rg1".into(),
            "loc1".into(),
        )
    }

    fn file_in(dir: &TempDir) -> CredentialFile {
        CredentialFile::new(&CredentialFileConfig::new(dir.path().join("azure.json"))).unwrap()
    }

    #[test]
    fn renders_indented_document() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        file.render(&sample()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            r#"{
    "cloud": "AzurePublicCloud",
    "tenantId": "t1",
    "subscriptionId": "s1",
    "aadClientId": "c1",
    "aadClientSecret": "x1",
    "resourceGroup": "rg1",
    "location": "loc1"
}
"#
        );
    }

    #[test]
    fn values_are_escaped_not_interpolated() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        let creds = Credentials::new(
            AzureCloud::Public,
            "t".into(),
            "s".into(),
            "c".into(),
            "se\"cr<et>\\".into(),
            "rg".into(),
            "loc".into(),
        );
        file.render(&creds).unwrap();

        let parsed: Credentials =
            serde_json::from_slice(&std::fs::read(file.path()).unwrap()).unwrap();
        assert_eq!(parsed, creds);
    }

    #[test]
    fn render_overwrites_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        std::fs::write(file.path(), "stale").unwrap();

        file.render(&sample()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("\"tenantId\": \"t1\""));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);
        file.render(&sample()).unwrap();

        let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn missing_parent_is_create_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("azure.json");
        let err = CredentialFile::at(&path).render(&sample()).unwrap_err();
        match err {
            CredentialFileError::FileCreate { path: err_path, .. } => assert_eq!(err_path, path),
            other => panic!("expected FileCreate, got {other:?}"),
        }
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir);

        file.delete().unwrap();
        file.render(&sample()).unwrap();
        file.delete().unwrap();
        assert!(!file.path().exists());
        file.delete().unwrap();
    }

    #[test]
    fn delete_directory_fails() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::at(dir.path());
        let err = file.delete().unwrap_err();
        assert!(matches!(err, CredentialFileError::FileDelete { .. }), "{err:?}");
    }

    #[test]
    fn default_points_at_tmp() {
        assert_eq!(CredentialFile::default().path(), Path::new("/tmp/azure.json"));
    }
}
