//! Domain model for staff records and absence/training events.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep admission policy constants (conflict matrix, visibility window)
//!   next to the types they govern.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Policy rules live here as data; services only evaluate them.

pub mod department;
pub mod employee;
pub mod event;
pub mod position;
