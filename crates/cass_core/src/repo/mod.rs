//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the external key-value store contract used for durable state.
//! - Own the invoice history log on top of that store.
//!
//! # Invariants
//! - History is only ever written as a full, ordered sequence under one key.
//! - Store failures are returned as typed errors, never swallowed on write.

pub mod history_repo;
pub mod kv_store;
