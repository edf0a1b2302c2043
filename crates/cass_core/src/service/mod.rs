//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate cart, numbering and history calls into checkout flows.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod attendance_service;
pub mod invoice_service;
pub mod numbering;
