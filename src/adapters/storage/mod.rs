//! Storage Adapters
//!
//! Implementations of the SelectionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySelectionStore** - Process-wide map guarded by a tokio `RwLock`
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySelectionStore;
//!
//! let store: Arc<dyn SelectionStore> = Arc::new(InMemorySelectionStore::new());
//! ```

mod in_memory_selection_store;

pub use in_memory_selection_store::InMemorySelectionStore;
