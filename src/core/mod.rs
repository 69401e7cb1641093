//! Core business logic for the storefront.
//!
//! These modules are framework-agnostic: every operation takes an explicit
//! database connection and, where relevant, an explicit caller identity.
//! A presentation layer renders the entities and derived views they return.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
