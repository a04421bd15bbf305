//! # Domain Types
//!
//! Core domain types used throughout Stockpile.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductDraft   │   │   SearchField   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  Id             │       │
//! │  │  name           │   │  description?   │   │  Name           │       │
//! │  │  description?   │   │  quantity       │   │  Category       │       │
//! │  │  quantity       │   │  price          │   └─────────────────┘       │
//! │  │  price          │   │  category?      │                             │
//! │  │  category?      │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │ MutationOutcome │       │
//! │                                              │  Applied        │       │
//! │                                              │  NotFound       │       │
//! │                                              │  Failed(reason) │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `ProductId` is assigned by the store (SQLite AUTOINCREMENT). It is never
//! reused, even after the row is deleted.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Product Id
// =============================================================================

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct ProductId(i64);

impl ProductId {
    /// Wraps a raw row id.
    #[inline]
    pub const fn new(id: i64) -> Self {
        ProductId(id)
    }

    /// Returns the raw row id.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stored product row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier, assigned on insert.
    pub id: ProductId,

    /// Display name. Never empty for a stored row.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Units in stock.
    pub quantity: i64,

    /// Unit price.
    pub price: f64,

    /// Optional grouping label.
    pub category: Option<String>,
}

impl Product {
    /// Folds empty optional text into `None`.
    ///
    /// Rows written by older tools may hold `''` instead of NULL; both mean
    /// "absent" to the rest of the system.
    pub fn normalized(mut self) -> Self {
        self.description = normalize_optional_text(self.description.as_deref());
        self.category = normalize_optional_text(self.category.as_deref());
        self
    }

    /// Returns true when the product is out of stock.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Converts this product back into the editable field set.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            price: self.price,
            category: self.category.clone(),
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// The caller-supplied fields of a product, used for insert and update.
///
/// ## Caller Contract
/// The shell guarantees `quantity >= 0` and `price > 0` before handing a
/// draft to the store. The store only re-checks that `name` is not blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub category: Option<String>,
}

impl ProductDraft {
    /// Creates a draft with the required fields; optional text starts empty.
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> Self {
        ProductDraft {
            name: name.into(),
            description: None,
            quantity,
            price,
            category: None,
        }
    }

    /// Sets the description. Blank text is treated as absent.
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = normalize_optional_text(Some(description.as_ref()));
        self
    }

    /// Sets the category. Blank text is treated as absent.
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = normalize_optional_text(Some(category.as_ref()));
        self
    }

    /// Returns a copy with trimmed name and normalized optional text.
    ///
    /// This is the exact shape written to storage.
    pub fn normalized(&self) -> Self {
        ProductDraft {
            name: self.name.trim().to_string(),
            description: normalize_optional_text(self.description.as_deref()),
            quantity: self.quantity,
            price: self.price,
            category: normalize_optional_text(self.category.as_deref()),
        }
    }
}

/// Maps empty or whitespace-only text to `None`, trimming everything else.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Search Field
// =============================================================================

/// The closed set of columns a product search may filter on.
///
/// Each variant maps to a pre-built query in the store; nothing the caller
/// types ever becomes part of the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Exact match on the product id.
    Id,
    /// Case-sensitive substring match on the name.
    Name,
    /// Case-sensitive substring match on the category.
    Category,
}

impl SearchField {
    /// All searchable fields, in menu order.
    pub const ALL: [SearchField; 3] = [SearchField::Id, SearchField::Name, SearchField::Category];

    /// Canonical token for this field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Name => "name",
            SearchField::Category => "category",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = ValidationError;

    /// Parses a field token. `nombre` and `categoria` are accepted as aliases
    /// so scripts written against the legacy column names keep working.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SearchField::Id),
            "name" | "nombre" => Ok(SearchField::Name),
            "category" | "categoria" => Ok(SearchField::Category),
            _ => Err(ValidationError::NotAllowed {
                field: "search field".to_string(),
                allowed: SearchField::ALL.iter().map(|f| f.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Mutation Outcome
// =============================================================================

/// Result of a targeted mutation (update or delete) on one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Exactly one row was changed.
    Applied,
    /// No row has the requested id.
    NotFound,
    /// The mutation could not be carried out.
    Failed(String),
}

impl MutationOutcome {
    /// True only for [`MutationOutcome::Applied`].
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
