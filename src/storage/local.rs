/**
 * Local Avatar Storage
 *
 * Writes avatars to a directory on the server's filesystem and returns
 * URLs under the public base path at which the router serves that
 * directory (`/media/avatars` by default).
 *
 * Intended for development and single-host deployments; production
 * setups point the configuration at the remote backend instead.
 */

use async_trait::async_trait;
use std::path::PathBuf;

use crate::storage::{AvatarStore, StorageError};

/// Filesystem-backed avatar store
pub struct LocalAvatarStore {
    root: PathBuf,
    public_base: String,
}

impl LocalAvatarStore {
    /// Create a store rooted at `root`, serving URLs under `public_base`
    ///
    /// Creates the directory eagerly so that a missing media root shows
    /// up at startup, not on the first upload.
    pub fn new(root: PathBuf, public_base: &str) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base: public_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AvatarStore for LocalAvatarStore {
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, StorageError> {
        let path = self.root.join(suggested_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), "avatar written to local storage");
        Ok(format!("{}/{}", self.public_base, suggested_name))
    }
}
