//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Search on an allow-listed field
//! - Low-stock report
//!
//! ## Two Error Styles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Channels                                       │
//! │                                                                         │
//! │  try_list_all / try_update / search_by / ...                           │
//! │       │   DbResult<T>: the error propagates with `?`                   │
//! │       ▼                                                                 │
//! │  list_all / update / search / ...                                      │
//! │       │   Fail-soft: errors are logged and become a value              │
//! │       │   (empty Vec, MutationOutcome::Failed)                         │
//! │       ▼                                                                 │
//! │  Shell renders whatever it got; the session keeps running              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Search Statements
//! The searchable column is never spliced into SQL at runtime. Each
//! [`SearchField`] selects one of three prepared statements, and the user's
//! value is always a bound parameter.

use sqlx::SqlitePool;
use tracing::{debug, error, warn};

use crate::error::DbResult;
use stockpile_core::validation::validate_product_name;
use stockpile_core::{MutationOutcome, Product, ProductDraft, ProductId, SearchField};

/// Builds a SELECT over the product table with the on-disk column names
/// aliased to `Product` field names.
macro_rules! select_products {
    ($tail:literal) => {
        concat!(
            "SELECT id, nombre AS name, descripcion AS description, ",
            "cantidad AS quantity, precio AS price, categoria AS category ",
            "FROM productos ",
            $tail
        )
    };
}

const INSERT_PRODUCT: &str = "INSERT INTO productos (nombre, descripcion, cantidad, precio, categoria) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

const UPDATE_PRODUCT: &str = "UPDATE productos \
     SET nombre = ?2, descripcion = ?3, cantidad = ?4, precio = ?5, categoria = ?6 \
     WHERE id = ?1";

const DELETE_PRODUCT: &str = "DELETE FROM productos WHERE id = ?1";

const LIST_ALL: &str = select_products!("ORDER BY id");

const GET_BY_ID: &str = select_products!("WHERE id = ?1");

// instr() is case-sensitive, unlike LIKE, and needs no wildcard escaping
const SEARCH_BY_ID: &str = select_products!("WHERE id = ?1 ORDER BY id");
const SEARCH_BY_NAME: &str = select_products!("WHERE instr(nombre, ?1) > 0 ORDER BY id");
const SEARCH_BY_CATEGORY: &str = select_products!("WHERE instr(categoria, ?1) > 0 ORDER BY id");

const LOW_STOCK: &str = select_products!("WHERE cantidad <= ?1 ORDER BY cantidad ASC, id ASC");

/// Returns the prepared statement for a search field.
const fn search_statement(field: SearchField) -> &'static str {
    match field {
        SearchField::Id => SEARCH_BY_ID,
        SearchField::Name => SEARCH_BY_NAME,
        SearchField::Category => SEARCH_BY_CATEGORY,
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.insert(&ProductDraft::new("Widget", 10, 2.50)).await?;
/// let tools = repo.search("category", "Tools").await;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Inserts a product and returns the id the store assigned to it.
    ///
    /// ## Caller Contract
    /// `quantity >= 0` and `price > 0` are checked by the shell, not here.
    ///
    /// ## Returns
    /// * `Ok(ProductId)` - Row written
    /// * `Err(DbError::Validation)` - Blank name
    /// * `Err(DbError::ConstraintViolation)` - A NOT NULL column was violated
    /// * `Err(_)` - Storage failure; nothing was written
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<ProductId> {
        let draft = draft.normalized();
        validate_product_name(&draft.name)?;

        debug!(name = %draft.name, quantity = draft.quantity, "Inserting product");

        let result = sqlx::query(INSERT_PRODUCT)
            .bind(&draft.name)
            .bind(draft.description.as_deref())
            .bind(draft.quantity)
            .bind(draft.price)
            .bind(draft.category.as_deref())
            .execute(&self.pool)
            .await?;

        let id = ProductId::new(result.last_insert_rowid());
        debug!(id = %id, "Product inserted");
        Ok(id)
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Lists every product in ascending id order.
    pub async fn try_list_all(&self) -> DbResult<Vec<Product>> {
        debug!("Listing all products");

        let products = sqlx::query_as::<_, Product>(LIST_ALL)
            .fetch_all(&self.pool)
            .await?;

        Ok(normalize_all(products))
    }

    /// Lists every product in ascending id order.
    ///
    /// Fail-soft: a storage error is logged and yields an empty list, so
    /// browsing never ends the session.
    pub async fn list_all(&self) -> Vec<Product> {
        self.try_list_all().await.unwrap_or_else(|err| {
            error!(error = %err, "Failed to list products");
            Vec::new()
        })
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(GET_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product.map(Product::normalized))
    }

    /// Counts stored products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Replaces every mutable field of the product with `id`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Exactly one row changed
    /// * `Ok(false)` - No product has this id
    /// * `Err(_)` - Blank name or storage failure
    pub async fn try_update(&self, id: ProductId, draft: &ProductDraft) -> DbResult<bool> {
        let draft = draft.normalized();
        validate_product_name(&draft.name)?;

        debug!(id = %id, "Updating product");

        let result = sqlx::query(UPDATE_PRODUCT)
            .bind(id)
            .bind(&draft.name)
            .bind(draft.description.as_deref())
            .bind(draft.quantity)
            .bind(draft.price)
            .bind(draft.category.as_deref())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Replaces every mutable field of the product with `id`, reporting the
    /// outcome as a value.
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> MutationOutcome {
        let outcome = outcome_of(self.try_update(id, draft).await);
        if let MutationOutcome::Failed(reason) = &outcome {
            error!(id = %id, error = %reason, "Failed to update product");
        }
        outcome
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Permanently removes the product with `id`. Its id is never reassigned.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row removed
    /// * `Ok(false)` - No product has this id
    pub async fn try_delete(&self, id: ProductId) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query(DELETE_PRODUCT)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Permanently removes the product with `id`, reporting the outcome as a
    /// value.
    pub async fn delete(&self, id: ProductId) -> MutationOutcome {
        let outcome = outcome_of(self.try_delete(id).await);
        if let MutationOutcome::Failed(reason) = &outcome {
            error!(id = %id, error = %reason, "Failed to delete product");
        }
        outcome
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Searches one field.
    ///
    /// ## Matching
    /// - `Id`: exact match. Integral text (`7`, `+7`, `7.0`) is accepted;
    ///   anything else matches nothing.
    /// - `Name` / `Category`: case-sensitive substring. NULL never matches;
    ///   an empty value matches every non-NULL column.
    ///
    /// Results come back in ascending id order.
    pub async fn search_by(&self, field: SearchField, value: &str) -> DbResult<Vec<Product>> {
        debug!(field = %field, value = %value, "Searching products");

        let statement = search_statement(field);

        let products = match field {
            SearchField::Id => {
                let Some(id) = parse_id_value(value) else {
                    debug!(value = %value, "Id search value is not an integer");
                    return Ok(Vec::new());
                };

                sqlx::query_as::<_, Product>(statement)
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await?
            }
            SearchField::Name | SearchField::Category => {
                sqlx::query_as::<_, Product>(statement)
                    .bind(value)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(count = products.len(), "Search returned products");
        Ok(normalize_all(products))
    }

    /// Searches by a field token (`"id"`, `"name"`, `"category"`).
    ///
    /// Fail-soft: an unknown field token or a storage error yields an empty
    /// list. Unknown tokens are rejected before any SQL runs.
    pub async fn search(&self, field: &str, value: &str) -> Vec<Product> {
        let field = match field.parse::<SearchField>() {
            Ok(field) => field,
            Err(err) => {
                warn!(field = %field, error = %err, "Rejected search field");
                return Vec::new();
            }
        };

        self.search_by(field, value).await.unwrap_or_else(|err| {
            error!(field = %field, error = %err, "Failed to search products");
            Vec::new()
        })
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Products with `quantity <= threshold`, lowest quantity first.
    ///
    /// A threshold of zero lists only out-of-stock products. Negative
    /// thresholds are not rejected here; they simply match nothing stocked
    /// under the caller contract.
    pub async fn try_low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        debug!(threshold = threshold, "Building low-stock report");

        let products = sqlx::query_as::<_, Product>(LOW_STOCK)
            .bind(threshold)
            .fetch_all(&self.pool)
            .await?;

        Ok(normalize_all(products))
    }

    /// Fail-soft form of [`try_low_stock`](Self::try_low_stock).
    pub async fn low_stock(&self, threshold: i64) -> Vec<Product> {
        self.try_low_stock(threshold).await.unwrap_or_else(|err| {
            error!(threshold = threshold, error = %err, "Failed to build low-stock report");
            Vec::new()
        })
    }
}

/// Reads an id search value the way SQLite's integer affinity would:
/// a float that converts to an integer without loss counts as that integer.
fn parse_id_value(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(id) = value.parse::<i64>() {
        return Some(id);
    }

    let float = value.parse::<f64>().ok()?;
    let id = float as i64;
    (float.is_finite() && float.fract() == 0.0 && id as f64 == float).then_some(id)
}

fn normalize_all(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().map(Product::normalized).collect()
}

fn outcome_of(result: DbResult<bool>) -> MutationOutcome {
    match result {
        Ok(true) => MutationOutcome::Applied,
        Ok(false) => MutationOutcome::NotFound,
        Err(err) => MutationOutcome::Failed(err.to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};
    use assert_matches::assert_matches;

    async fn repo() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    fn widget() -> ProductDraft {
        ProductDraft::new("Widget", 10, 2.50)
            .with_description("A widget")
            .with_category("Tools")
    }

    fn gadget() -> ProductDraft {
        ProductDraft::new("Gadget", 0, 9.99).with_category("Tools")
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[tokio::test]
    async fn test_inventory_scenario() {
        let (_db, repo) = repo().await;

        let widget_id = repo.insert(&widget()).await.unwrap();
        let gadget_id = repo
            .insert(&gadget().with_description(""))
            .await
            .unwrap();
        assert_eq!(widget_id, ProductId::new(1));
        assert_eq!(gadget_id, ProductId::new(2));

        let out_of_stock = repo.low_stock(0).await;
        assert_eq!(ids(&out_of_stock), vec![2]);
        assert_eq!(out_of_stock[0].quantity, 0);

        let tools = repo.search("category", "Tools").await;
        assert_eq!(ids(&tools), vec![1, 2]);

        let restocked = ProductDraft::new("Widget", 3, 2.50)
            .with_description("A widget")
            .with_category("Tools");
        assert_eq!(repo.update(widget_id, &restocked).await, MutationOutcome::Applied);

        let all = repo.list_all().await;
        assert_eq!(ids(&all), vec![1, 2]);
        assert_eq!(all[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_insert_round_trip() {
        let (_db, repo) = repo().await;

        let id = repo.insert(&widget()).await.unwrap();
        let product = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.to_draft(), widget());

        let by_search = repo.search("id", &id.to_string()).await;
        assert_eq!(by_search, vec![product]);
    }

    #[tokio::test]
    async fn test_empty_optional_text_is_stored_as_absent() {
        let (db, repo) = repo().await;

        let draft = ProductDraft {
            name: "Gadget".to_string(),
            description: Some(String::new()),
            quantity: 1,
            price: 1.0,
            category: Some("  ".to_string()),
        };
        let id = repo.insert(&draft).await.unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.description, None);
        assert_eq!(product.category, None);

        let nulls: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM productos WHERE descripcion IS NULL AND categoria IS NULL",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(nulls, 1);
    }

    #[tokio::test]
    async fn test_legacy_empty_strings_read_back_as_absent() {
        let (db, repo) = repo().await;

        sqlx::query(
            "INSERT INTO productos (nombre, descripcion, cantidad, precio, categoria) \
             VALUES ('Legacy', '', 4, 1.5, '')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let all = repo.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, None);
        assert_eq!(all[0].category, None);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let (_db, repo) = repo().await;

        let err = repo
            .insert(&ProductDraft::new("   ", 1, 1.0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count().await.unwrap(), 0);

        let id = repo.insert(&widget()).await.unwrap();
        assert_matches!(
            repo.update(id, &ProductDraft::new("", 1, 1.0)).await,
            MutationOutcome::Failed(_)
        );
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().name, "Widget");
    }

    #[tokio::test]
    async fn test_null_required_column_is_a_validation_error() {
        let (db, _repo) = repo().await;

        let err = sqlx::query("INSERT INTO productos (nombre, cantidad, precio) VALUES (NULL, 1, 1.0)")
            .execute(db.pool())
            .await
            .map_err(DbError::from)
            .unwrap_err();

        assert_matches!(&err, DbError::ConstraintViolation { .. });
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_ids_increase_and_are_never_reused() {
        let (_db, repo) = repo().await;

        let mut last = 0;
        for n in 0..5 {
            let id = repo
                .insert(&ProductDraft::new(format!("Item {n}"), n, 1.0))
                .await
                .unwrap();
            assert!(id.get() > last);
            last = id.get();
        }

        assert!(repo.delete(ProductId::new(last)).await.is_success());
        let next = repo.insert(&widget()).await.unwrap();
        assert_eq!(next.get(), last + 1);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let (_db, repo) = repo().await;
        let id = repo.insert(&widget()).await.unwrap();

        let change = ProductDraft::new("Widget XL", 7, 3.25).with_category("Tools");
        assert_eq!(repo.update(id, &change).await, MutationOutcome::Applied);
        let first = repo.get_by_id(id).await.unwrap();

        assert_eq!(repo.update(id, &change).await, MutationOutcome::Applied);
        let second = repo.get_by_id(id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.unwrap().description, None);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let (_db, repo) = repo().await;

        assert_eq!(
            repo.update(ProductId::new(42), &widget()).await,
            MutationOutcome::NotFound
        );
        assert!(!repo.try_update(ProductId::new(42), &widget()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_final() {
        let (_db, repo) = repo().await;
        let id = repo.insert(&widget()).await.unwrap();

        assert_eq!(repo.delete(id).await, MutationOutcome::Applied);
        assert!(repo.search("id", &id.to_string()).await.is_empty());
        assert_eq!(repo.delete(id).await, MutationOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_low_stock_boundary() {
        let (_db, repo) = repo().await;

        for qty in [10, 0, 5] {
            repo.insert(&ProductDraft::new(format!("Qty {qty}"), qty, 1.0))
                .await
                .unwrap();
        }

        let quantities = |products: Vec<Product>| -> Vec<i64> {
            products.iter().map(|p| p.quantity).collect()
        };

        assert_eq!(quantities(repo.low_stock(5).await), vec![0, 5]);
        assert_eq!(quantities(repo.low_stock(0).await), vec![0]);
        assert_eq!(quantities(repo.low_stock(100).await), vec![0, 5, 10]);
        assert!(repo.low_stock(-1).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_field_allow_list() {
        let (_db, repo) = repo().await;
        repo.insert(&ProductDraft::new("Ten", 1, 10.0)).await.unwrap();

        assert!(repo.search("price", "10").await.is_empty());
        assert!(repo.search("1=1 OR id", "1").await.is_empty());
        assert_eq!(repo.search("id", "1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive_substring() {
        let (_db, repo) = repo().await;
        repo.insert(&widget()).await.unwrap();
        repo.insert(&ProductDraft::new("Blue widget", 2, 1.0)).await.unwrap();
        repo.insert(&ProductDraft::new("Uncategorized", 2, 1.0)).await.unwrap();

        assert_eq!(ids(&repo.search("name", "idget").await), vec![1, 2]);
        assert_eq!(ids(&repo.search("name", "Widget").await), vec![1]);
        assert_eq!(ids(&repo.search("name", "widget").await), vec![2]);
        assert!(repo.search("category", "tools").await.is_empty());

        // Wildcard characters are plain text to instr()
        assert!(repo.search("name", "%").await.is_empty());

        // An empty value matches every non-NULL column
        assert_eq!(ids(&repo.search("category", "").await), vec![1]);
    }

    #[tokio::test]
    async fn test_search_id_with_non_numeric_value() {
        let (_db, repo) = repo().await;
        repo.insert(&widget()).await.unwrap();

        assert!(repo.search("id", "one").await.is_empty());
        assert!(repo.search_by(SearchField::Id, "1 OR 1=1").await.unwrap().is_empty());
        assert_eq!(repo.search("id", " 1 ").await.len(), 1);
    }

    #[tokio::test]
    async fn test_search_id_accepts_integral_numbers() {
        let (_db, repo) = repo().await;
        repo.insert(&widget()).await.unwrap();

        assert_eq!(ids(&repo.search("id", "+1").await), vec![1]);
        assert_eq!(ids(&repo.search("id", "1.0").await), vec![1]);
        assert!(repo.search("id", "1.5").await.is_empty());
        assert!(repo.search("id", "NaN").await.is_empty());
        assert!(repo.search("id", "1e400").await.is_empty());
    }

    #[test]
    fn test_parse_id_value() {
        assert_eq!(parse_id_value("42"), Some(42));
        assert_eq!(parse_id_value(" 2.0 "), Some(2));
        assert_eq!(parse_id_value("-3"), Some(-3));
        assert_eq!(parse_id_value("2.25"), None);
        assert_eq!(parse_id_value("inf"), None);
        assert_eq!(parse_id_value(""), None);
    }

    #[tokio::test]
    async fn test_empty_table_lists_nothing() {
        let (_db, repo) = repo().await;

        assert!(repo.list_all().await.is_empty());
        assert!(repo.try_list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_fail_soft() {
        let (db, repo) = repo().await;
        let id = repo.insert(&widget()).await.unwrap();
        db.close().await;

        assert!(repo.list_all().await.is_empty());
        assert!(repo.search("name", "Widget").await.is_empty());
        assert!(repo.low_stock(100).await.is_empty());
        assert_matches!(repo.update(id, &widget()).await, MutationOutcome::Failed(_));
        assert_matches!(repo.delete(id).await, MutationOutcome::Failed(_));

        let err = repo.insert(&widget()).await.unwrap_err();
        assert!(err.is_storage());
    }
}
