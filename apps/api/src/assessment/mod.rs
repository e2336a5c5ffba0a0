// Assessment scoring & career matching.
// Deterministic core (accumulator, catalog, matcher, profile) plus the
// best-effort narrative step and the persistence boundary.

pub mod accumulator;
pub mod catalog;
pub mod error;
pub mod handlers;
pub mod matcher;
pub mod narrative;
pub mod profile;
pub mod prompts;
pub mod questions;
pub mod service;
pub mod store;
pub mod traits;
