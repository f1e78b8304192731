//! The reactive bundle store.
//!
//! A single-writer mutable cell holding the bundle being edited and the
//! signed-in user. Every mutation notifies subscribers and enqueues a
//! persistence write; writes are applied by a background task in mutation
//! order, so the persisted copy never observes reordered edits.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use linkdeck_core::{Link, LinkBundle, User};

use crate::storage::{LocalStorage, StorageError};

/// Well-known local storage key the serialized bundle lives under.
pub const BUNDLE_STORAGE_KEY: &str = "linkBundle";

/// Errors raised by bundle store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A reorder named a source index outside the link sequence.
    #[error("link index {index} out of range for {len} links")]
    IndexOutOfRange { index: usize, len: usize },

    /// The store went away before the write could be applied.
    #[error("persistence write abandoned")]
    WriteAbandoned,

    /// Storage backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The bundle could not be serialized for storage.
    #[error("bundle serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome handle for one persistence write.
///
/// The write proceeds whether or not the handle is kept: await it to
/// observe the result, or drop it for fire-and-forget. Failed writes are
/// logged either way and the store keeps operating in-memory.
#[derive(Debug)]
pub struct Persist {
    rx: oneshot::Receiver<Result<(), StoreError>>,
}

impl Persist {
    /// Wait for the write to complete.
    ///
    /// # Errors
    ///
    /// Returns the storage or serialization failure for this write, or
    /// `WriteAbandoned` if the store was dropped before the write ran.
    pub async fn wait(self) -> Result<(), StoreError> {
        self.rx.await.unwrap_or(Err(StoreError::WriteAbandoned))
    }
}

/// One queued write: the bundle snapshot and the channel its outcome is
/// reported on.
struct WriteRequest {
    bundle: LinkBundle,
    ack: oneshot::Sender<Result<(), StoreError>>,
}

/// The client-side state container for one editing session.
///
/// Construct one per session with [`BundleStore::new`] and pass it to the
/// views that need it; dropping the store closes the persistence queue and
/// ends its writer task. Mutations take `&mut self` - the store is
/// single-writer by construction.
pub struct BundleStore {
    bundle: LinkBundle,
    user: Option<User>,
    changed: broadcast::Sender<()>,
    writes: mpsc::UnboundedSender<WriteRequest>,
    storage: Arc<dyn LocalStorage>,
}

impl BundleStore {
    /// Create a store over a storage backend, holding an empty bundle and
    /// no user. Spawns the background writer task, so this must be called
    /// from within a tokio runtime.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        let (writes, rx) = mpsc::unbounded_channel();
        let (changed, _) = broadcast::channel(16);

        tokio::spawn(run_writer(Arc::clone(&storage), rx));

        Self {
            bundle: LinkBundle::default(),
            user: None,
            changed,
            writes,
            storage,
        }
    }

    /// The bundle currently being edited. Never absent - an empty bundle
    /// stands in until one is loaded or set.
    #[must_use]
    pub fn bundle(&self) -> &LinkBundle {
        &self.bundle
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Subscribe to change events.
    ///
    /// One payload-free event is delivered per mutation; subscribers
    /// re-read [`Self::bundle`]/[`Self::user`] rather than receiving
    /// deltas. A receiver that falls more than a few events behind sees a
    /// `Lagged` error and can simply re-read current state.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    /// Replace the whole bundle.
    pub fn set_bundle(&mut self, bundle: LinkBundle) -> Persist {
        self.bundle = bundle;
        self.notify();
        self.persist()
    }

    /// Replace the signed-in user.
    ///
    /// Notifies subscribers but does not persist - the user is never
    /// written to local storage.
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        self.notify();
    }

    /// Load the persisted bundle, replacing the in-memory one if present.
    ///
    /// Returns `true` when a stored bundle was loaded (subscribers are
    /// notified), `false` when nothing usable was stored - a missing key
    /// or malformed data leaves the current bundle untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` when the backend cannot be read.
    pub async fn load_from_storage(&mut self) -> Result<bool, StoreError> {
        let Some(json) = self.storage.get_item(BUNDLE_STORAGE_KEY).await? else {
            return Ok(false);
        };

        match serde_json::from_str::<LinkBundle>(&json) {
            Ok(bundle) => {
                self.bundle = bundle;
                self.notify();
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored bundle is malformed; keeping current bundle");
                Ok(false)
            }
        }
    }

    /// Append a link to the end of the sequence.
    pub fn add_link(&mut self, link: Link) -> Persist {
        self.bundle.links.push(link);
        self.notify();
        self.persist()
    }

    /// Remove the first link equal to `link`.
    ///
    /// Returns the persistence handle, or `None` when no link matched
    /// (nothing changed, nothing is notified or persisted).
    pub fn delete_link(&mut self, link: &Link) -> Option<Persist> {
        let index = self.bundle.links.iter().position(|candidate| candidate == link)?;
        self.bundle.links.remove(index);
        self.notify();
        Some(self.persist())
    }

    /// Copy the presentational fields of `updated` onto the first link
    /// equal to `existing`, in place.
    ///
    /// Title, description and image are editable this way; the target URL
    /// and the link's position are deliberately untouched. Returns `None`
    /// when no link matched.
    pub fn update_link(&mut self, existing: &Link, updated: &Link) -> Option<Persist> {
        let link = self
            .bundle
            .links
            .iter_mut()
            .find(|candidate| **candidate == *existing)?;

        link.title = updated.title.clone();
        link.description = updated.description.clone();
        link.image = updated.image.clone();

        self.notify();
        Some(self.persist())
    }

    /// Move the link at `from` so it lands at `to`.
    ///
    /// When `to` is beyond the end of the (post-removal) sequence the link
    /// is appended instead.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IndexOutOfRange` when `from` is not a valid
    /// index; the sequence is left unchanged and nothing is notified or
    /// persisted.
    pub fn reorder_links(&mut self, from: usize, to: usize) -> Result<Persist, StoreError> {
        let len = self.bundle.links.len();
        if from >= len {
            return Err(StoreError::IndexOutOfRange { index: from, len });
        }

        let link = self.bundle.links.remove(from);
        if to < self.bundle.links.len() {
            self.bundle.links.insert(to, link);
        } else {
            self.bundle.links.push(link);
        }

        self.notify();
        Ok(self.persist())
    }

    fn notify(&self) {
        // No subscribers is fine.
        let _ = self.changed.send(());
    }

    fn persist(&self) -> Persist {
        let (ack, rx) = oneshot::channel();
        let request = WriteRequest {
            bundle: self.bundle.clone(),
            ack,
        };

        // The writer task outlives every sender; a failed send only means
        // the store is already being torn down, which the dropped ack
        // reports as WriteAbandoned.
        let _ = self.writes.send(request);

        Persist { rx }
    }
}

/// Apply queued writes in arrival order until every sender is gone.
async fn run_writer(
    storage: Arc<dyn LocalStorage>,
    mut requests: mpsc::UnboundedReceiver<WriteRequest>,
) {
    while let Some(request) = requests.recv().await {
        let result = write_bundle(storage.as_ref(), &request.bundle).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "bundle persistence failed; continuing in-memory");
        }
        // The caller may have dropped its Persist handle.
        let _ = request.ack.send(result);
    }
}

async fn write_bundle(storage: &dyn LocalStorage, bundle: &LinkBundle) -> Result<(), StoreError> {
    let json = serde_json::to_string(bundle)?;
    storage.set_item(BUNDLE_STORAGE_KEY, &json).await?;
    Ok(())
}
