//! # Repository Module
//!
//! Database repository implementations for Stockpile.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Shell action                                                          │
//! │       │                                                                 │
//! │       │  db.products().low_stock(5)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, draft)          → DbResult<ProductId>               │
//! │  ├── list_all(&self)               → Vec<Product>      (fail-soft)     │
//! │  ├── update(&self, id, draft)      → MutationOutcome                   │
//! │  ├── delete(&self, id)             → MutationOutcome                   │
//! │  ├── search(&self, field, value)   → Vec<Product>      (fail-soft)     │
//! │  └── low_stock(&self, threshold)   → Vec<Product>      (fail-soft)     │
//! │       │                                                                 │
//! │       │  One SQL statement                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, search, reports

pub mod product;
