//! Infrastructure Layer

pub mod user_store;

pub use user_store::UserStore;
