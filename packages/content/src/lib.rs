//! # Pagewright Content
//!
//! Persistence for pages and custom component schemas.
//!
//! - [`ContentStore`]: async storage trait, with filesystem and in-memory
//!   implementations
//! - [`RemotePoller`]: reports out-of-band changes to stored content
//! - [`publish`]: saves an edit session and acknowledges the saved version

mod error;
mod fs;
mod memory;
mod poller;
mod publish;
mod store;

pub use error::{StoreError, StoreResult};
pub use fs::FsContentStore;
pub use memory::MemoryContentStore;
pub use poller::{ChangeEvent, ChangeKind, PollerHandle, RemotePoller, DEFAULT_POLL_INTERVAL};
pub use publish::{load_registry, open_session, publish};
pub use store::{
    page_name_from_path, revision_of, schema_name_from_path, validate_schema_name, ContentStore,
    Revision,
};
