//! Avatar Storage Module
//!
//! Storage for uploaded avatar images behind a single collaborator
//! interface: `store(bytes, suggested_name) -> url`. Two backends exist,
//! selected by configuration at startup:
//!
//! - **`local`** - writes files under the media directory; the router
//!   serves them back at `/media/avatars/...`
//! - **`remote`** - uploads to a configured image service over HTTP and
//!   returns the URL the service assigns
//!
//! Content sniffing (`image`) lives here too: the API layer only accepts
//! bytes that actually look like PNG or JPEG, whatever the client named
//! the file.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::server::config::AvatarBackend;

/// Content sniffing for uploaded images
pub mod image;

/// Local filesystem backend
pub mod local;

/// Remote image-service backend
pub mod remote;

pub use image::ImageKind;
pub use local::LocalAvatarStore;
pub use remote::RemoteImageStore;

/// Failure while persisting an avatar
///
/// All variants surface to the client as an opaque 500; the detail is
/// logged server-side.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Local filesystem write failed
    #[error("failed to write avatar to disk: {0}")]
    Io(#[from] std::io::Error),
    /// Upload request to the remote service failed
    #[error("avatar upload failed: {0}")]
    Upload(#[from] reqwest::Error),
    /// The remote service answered with something unusable
    #[error("image service returned an unusable response: {0}")]
    BadResponse(String),
}

/// Where avatar bytes go
///
/// Implementations receive the raw image bytes and a server-chosen file
/// name, and return a URL at which the avatar is reachable afterwards.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, StorageError>;
}

/// Build the configured avatar store
///
/// For the local backend this also creates the avatar directory so the
/// first upload does not race directory creation.
pub fn from_config(backend: &AvatarBackend) -> Result<Arc<dyn AvatarStore>, std::io::Error> {
    match backend {
        AvatarBackend::Local { media_root } => {
            let store = LocalAvatarStore::new(media_root.join("avatars"), "/media/avatars")?;
            Ok(Arc::new(store))
        }
        AvatarBackend::Remote {
            upload_url,
            api_key,
        } => Ok(Arc::new(RemoteImageStore::new(
            upload_url.clone(),
            api_key.clone(),
        ))),
    }
}
