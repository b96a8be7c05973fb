//! Inventory domain module.
//!
//! This crate contains the in-memory catalog container: a keyed collection of
//! products enforcing id uniqueness and delegating stock rules to the products
//! themselves. Pure domain logic (no IO, no persistence).

pub mod inventory;

pub use inventory::Inventory;
