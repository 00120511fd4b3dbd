//! Persistence: remote SQL store with an always-on local JSON fallback.

pub mod cloud;
pub mod local;
pub mod store;

pub use cloud::CloudDb;
pub use local::LocalStore;
pub use store::EntityStore;
