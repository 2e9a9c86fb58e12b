//! Attachment state sources.
//!
//! Whether a local client is attached can change between any two events,
//! so the relay asks its [`AttachmentSource`] afresh every time.

use std::path::{Path, PathBuf};

/// Trait for reading the host's attachment state.
pub trait AttachmentSource {
    /// Returns true while a local client is attached to the host.
    fn is_local_user_attached(&self) -> bool;
}

impl<A: AttachmentSource + ?Sized> AttachmentSource for &A {
    fn is_local_user_attached(&self) -> bool {
        (**self).is_local_user_attached()
    }
}

impl<A: AttachmentSource + ?Sized> AttachmentSource for Box<A> {
    fn is_local_user_attached(&self) -> bool {
        (**self).is_local_user_attached()
    }
}

/// Attachment state that never changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticAttachment(pub bool);

impl AttachmentSource for StaticAttachment {
    fn is_local_user_attached(&self) -> bool {
        self.0
    }
}

/// Attachment state signalled by the presence of a marker file.
///
/// A client is considered attached while the file exists. Hosts touch the
/// file on attach and remove it on detach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFileAttachment {
    path: PathBuf,
}

impl MarkerFileAttachment {
    /// Creates a source watching `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the watched path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AttachmentSource for MarkerFileAttachment {
    fn is_local_user_attached(&self) -> bool {
        self.path.exists()
    }
}
