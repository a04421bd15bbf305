//! # Validation Module
//!
//! Parsing and validation of raw shell input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (apps/cli)                                             │
//! │  ├── Reads raw text from the terminal                                  │
//! │  └── THIS MODULE: integer / positive / non-empty checks                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store (stockpile-db)                                         │
//! │  └── Rejects a blank name before writing                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL constraints on name, quantity, price                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockpile_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_quantity("5").unwrap(), 5);
//! assert!(parse_quantity("-1").is_err());
//! assert!(parse_price("0").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::ProductId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Widget").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity (zero allowed).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be strictly positive (free items are not stocked)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================
// Each parser trims its input, converts it, then applies the matching
// validator above.

fn parse_integer(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::required(field));
    }

    raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })
}

/// Parses a stock quantity: a whole number, zero or greater.
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let qty = parse_integer("quantity", raw)?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses a unit price: a real number greater than zero.
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::parse_price;
///
/// assert_eq!(parse_price("2.50").unwrap(), 2.5);
/// assert!(parse_price("-3").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::required("price"));
    }

    let price = raw.parse::<f64>().map_err(|_| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "must be a number".to_string(),
    })?;

    validate_price(price)?;
    Ok(price)
}

/// Parses a product id. Any integer is accepted; existence is the store's
/// concern.
pub fn parse_product_id(raw: &str) -> ValidationResult<ProductId> {
    parse_integer("id", raw).map(ProductId::new)
}

/// Parses a low-stock threshold: a whole number, zero or greater.
pub fn parse_threshold(raw: &str) -> ValidationResult<i64> {
    let threshold = parse_integer("threshold", raw)?;

    if threshold < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "threshold".to_string(),
        });
    }

    Ok(threshold)
}

// =============================================================================
// Unit Tests
// =============================================================================
