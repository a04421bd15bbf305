//! # stockpile-core: Pure Domain Logic for Stockpile
//!
//! This crate holds the domain types and validation rules of the inventory
//! tracker. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Interaction Shell (apps/cli)                 │   │
//! │  │    Menu ──► Prompt ──► Parse ──► Store call ──► Render table    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockpile-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────┐  ┌──────────────┐  ┌─────────────────┐   │   │
//! │  │   │      types      │  │  validation  │  │      error      │   │   │
//! │  │   │ Product, Draft  │  │ parse_*,     │  │ ValidationError │   │   │
//! │  │   │ SearchField     │  │ validate_*   │  │                 │   │   │
//! │  │   └─────────────────┘  └──────────────┘  └─────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockpile-db (Database Layer)                    │   │
//! │  │              SQLite queries, schema, repository                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductDraft, SearchField, ...)
//! - [`error`] - Validation error type
//! - [`validation`] - Parsing and validation of raw shell input
//!
//! ## Example Usage
//!
//! ```rust
//! use stockpile_core::validation::{parse_price, parse_quantity};
//! use stockpile_core::ProductDraft;
//!
//! let draft = ProductDraft::new("Widget", parse_quantity("10").unwrap(), parse_price("2.50").unwrap())
//!     .with_category("Tools");
//!
//! assert_eq!(draft.quantity, 10);
//! assert_eq!(draft.category.as_deref(), Some("Tools"));
//! assert_eq!(draft.description, None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
