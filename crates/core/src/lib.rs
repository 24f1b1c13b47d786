//! Core business logic for the ERP service.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the store traits each module declares;
//! the db crate implements them.
//!
//! # Modules
//!
//! - `context` - Explicit request context (principal + capabilities)
//! - `sales` - Sale transactions: request coercion, totals, projections
//! - `admin` - Admin menu, module registry, mode switch
//! - `dashboard` - HR dashboard widgets
//! - `sanitize` - Plain-text and rich-text sanitization

pub mod admin;
pub mod context;
pub mod dashboard;
pub mod sales;
pub mod sanitize;
pub mod store;

pub use context::RequestContext;
pub use store::StoreError;
