// Directory backed implementation of the KeyValueStore port.
//
// Each key is one file inside the data directory. Writes go to a sibling
// temp file first and are renamed over the target, so a reader sees either
// the previous document or the new one.

use crate::shared::infrastructure::key_value_store::{KeyValueError, KeyValueStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct FileSystemKeyValueStore {
    root: PathBuf,
}

impl FileSystemKeyValueStore {
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, KeyValueError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| KeyValueError::Backend(format!("{}: {e}", root.display())))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{file_name}.json"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileSystemKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KeyValueError::Backend(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        let target = self.path_for(key);
        let staging = target.with_extension("json.tmp");
        tokio::fs::write(&staging, value)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::StorageFull => KeyValueError::QuotaExceeded {
                    needed: value.len(),
                    available: 0,
                },
                _ => KeyValueError::Backend(e.to_string()),
            })?;
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(KeyValueError::Backend(e.to_string()));
        }
        Ok(())
    }
}
