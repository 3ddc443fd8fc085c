//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs: event
//!   admission, employment termination, hierarchy resolution, directory
//!   listings.
//! - Keep callers (CLI/transport layers) decoupled from storage details.
//!
//! # Invariants
//! - Admission and termination sequences run inside the event repository's
//!   `exclusive` scope; the store never observes a half-applied decision.

pub mod employee_service;
pub mod event_service;
pub mod hierarchy_service;
pub mod termination_service;
