//! Domain model for the point-of-sale and attendance screens.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep cart state, finalized invoices and attendance records free of
//!   storage and presentation concerns.
//!
//! # Invariants
//! - Catalog items are read-only to core; carts only hold copies.
//! - A finalized `Invoice` is a snapshot and never references live cart state.

pub mod attendance;
pub mod cart;
pub mod catalog;
pub mod invoice;
