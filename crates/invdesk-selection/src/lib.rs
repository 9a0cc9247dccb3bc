//! Cross-page record selection for paginated, filtered list views.
//!
//! [`SelectionStore`] tracks either an explicit set of record ids or the
//! "every record matching the current filter" flag. It persists through a
//! [`SelectionBackend`] at lifecycle points and is shared between page
//! components through a [`SelectionHandle`], which publishes
//! [`SelectionChanged`] events to an idempotent [`SubscriptionRegistry`].

pub mod badge;
pub mod error;
pub mod handle;
pub mod persist;
pub mod registry;
pub mod store;

pub use badge::{BadgeState, HeaderCheckbox};
pub use error::{Result, SelectionError};
pub use handle::{SelectionChanged, SelectionHandle, WeakSelectionHandle};
pub use persist::{
    DEFAULT_NAMESPACE, JsonFileBackend, MemoryBackend, PersistenceScope, SelectionBackend,
};
pub use registry::{Handler, SubscriptionRegistry};
pub use store::{FilterChange, SelectionCount, SelectionStore};
