//! Data layer for the MotionSync fitness app: the user-progress store, its
//! persistence substrate, and the pure projections the UI renders from.

pub mod catalog;
pub mod db;
pub mod models;
pub mod projections;
pub mod store;

pub use db::{Database, RecordKey};
pub use store::{
    EventKind, Lifecycle, ObserverHandle, StoreError, StoreEvent, UserDataExport, UserDataStore,
    EXPORT_VERSION,
};
