//! # Interaction Shell
//!
//! The menu loop. It prompts, parses raw text with
//! `stockpile_core::validation`, calls the store, and renders the result.
//!
//! ## Menu Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Menu Loop                                        │
//! │                                                                         │
//! │  ┌──────────────┐     ┌───────────────┐     ┌──────────────────────┐   │
//! │  │ Show menu    │────►│ Read option   │────►│ Run action           │   │
//! │  └──────────────┘     └───────────────┘     │ (prompts + 1 store   │   │
//! │         ▲                                   │  call + render)      │   │
//! │         │                                   └──────────┬───────────┘   │
//! │         │            ┌───────────────┐                 │               │
//! │         └────────────│ Wait for ENTER│◄────────────────┘               │
//! │                      └───────────────┘                                  │
//! │                                                                         │
//! │  Leaves the loop on option 7 or when input reaches end of file.        │
//! │  A failed action prints a message; it never ends the session.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use stockpile_core::validation::{
    parse_price, parse_product_id, parse_quantity, parse_threshold, validate_product_name,
};
use stockpile_core::{normalize_optional_text, MutationOutcome, ProductDraft, SearchField};
use stockpile_db::ProductRepository;
use tracing::{debug, info, warn};

use crate::error::{ShellError, ShellResult};
use crate::render::{render_table, Palette, Tone};

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    List,
    Update,
    Delete,
    Search,
    LowStock,
    Exit,
}

impl MenuChoice {
    /// Parses the option number typed at the main menu.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Register),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Update),
            "4" => Some(MenuChoice::Delete),
            "5" => Some(MenuChoice::Search),
            "6" => Some(MenuChoice::LowStock),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Interactive inventory shell over any line-oriented input and output.
pub struct Shell<R, W> {
    products: ProductRepository,
    input: R,
    output: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(products: ProductRepository, input: R, output: W, palette: Palette) -> Self {
        Shell {
            products,
            input,
            output,
            palette,
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    pub async fn run(&mut self) -> ShellResult<()> {
        match self.menu_loop().await {
            Err(ShellError::InputClosed) => {
                debug!("Input closed, leaving menu loop");
                writeln!(self.output)?;
                Ok(())
            }
            other => other,
        }
    }

    async fn menu_loop(&mut self) -> ShellResult<()> {
        loop {
            self.show_menu()?;
            let raw = self.prompt("Choose an option (1-7): ")?;

            let Some(choice) = MenuChoice::parse(&raw) else {
                self.say(Tone::Error, "Invalid option. Try again.")?;
                self.pause()?;
                continue;
            };

            debug!(?choice, "Menu option selected");

            match choice {
                MenuChoice::Register => self.register_product().await?,
                MenuChoice::List => self.list_products().await?,
                MenuChoice::Update => self.update_product().await?,
                MenuChoice::Delete => self.delete_product().await?,
                MenuChoice::Search => self.search_products().await?,
                MenuChoice::LowStock => self.low_stock_report().await?,
                MenuChoice::Exit => {
                    self.say(Tone::Warning, "Goodbye!")?;
                    return Ok(());
                }
            }

            self.pause()?;
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    async fn register_product(&mut self) -> ShellResult<()> {
        self.say(Tone::Heading, "\n--- Register New Product ---")?;

        let name = self.prompt("Product name (required): ")?;
        if validate_product_name(&name).is_err() {
            return self.say(Tone::Error, "Name is required. Operation cancelled.");
        }

        let description = self.prompt("Description (optional): ")?;

        let quantity = match parse_quantity(&self.prompt("Quantity in stock (required): ")?) {
            Ok(quantity) => quantity,
            Err(_) => {
                return self.say(
                    Tone::Error,
                    "Quantity must be a whole number, zero or more. Operation cancelled.",
                )
            }
        };

        let price = match parse_price(&self.prompt("Price (required): ")?) {
            Ok(price) => price,
            Err(_) => {
                return self.say(
                    Tone::Error,
                    "Price must be a number greater than zero. Operation cancelled.",
                )
            }
        };

        let category = self.prompt("Category (optional): ")?;

        let draft = ProductDraft::new(name, quantity, price)
            .with_description(description)
            .with_category(category);

        match self.products.insert(&draft).await {
            Ok(id) => {
                info!(id = %id, "Product registered");
                self.say(
                    Tone::Success,
                    format!("✅ Product '{}' registered with id {}.", draft.name.trim(), id),
                )
            }
            Err(err) => self.say(Tone::Error, format!("❌ Could not register product: {err}")),
        }
    }

    async fn list_products(&mut self) -> ShellResult<()> {
        self.say(Tone::Heading, "\n--- Full Inventory ---")?;
        let products = self.products.list_all().await;
        render_table(&mut self.output, &self.palette, &products)?;
        Ok(())
    }

    async fn update_product(&mut self) -> ShellResult<()> {
        self.say(Tone::Heading, "\n--- Update Product by ID ---")?;

        let Ok(id) = parse_product_id(&self.prompt("ID of the product to update: ")?) else {
            return self.say(Tone::Error, "The ID must be a whole number.");
        };

        let current = match self.products.get_by_id(id).await {
            Ok(Some(product)) => product,
            Ok(None) => return self.say(Tone::Error, format!("No product found with ID {id}.")),
            Err(err) => return self.say(Tone::Error, format!("❌ Could not load product: {err}")),
        };

        self.say(Tone::Accent, "\n--- Current Values ---")?;
        render_table(&mut self.output, &self.palette, std::slice::from_ref(&current))?;
        self.say(
            Tone::Accent,
            "Enter new values, or press ENTER to keep the value shown in [brackets]:",
        )?;

        let mut draft = current.to_draft();

        let name = self.prompt(&format!("Name [{}]: ", draft.name))?;
        if !name.is_empty() {
            draft.name = name;
        }

        let shown = draft.description.clone().unwrap_or_default();
        let raw = self.prompt(&format!("Description [{shown}]: "))?;
        if let Some(description) = normalize_optional_text(Some(raw.as_str())) {
            draft.description = Some(description);
        }

        loop {
            let raw = self.prompt(&format!("Quantity [{}]: ", draft.quantity))?;
            if raw.is_empty() {
                break;
            }
            match parse_quantity(&raw) {
                Ok(quantity) => {
                    draft.quantity = quantity;
                    break;
                }
                Err(_) => self.say(Tone::Error, "Quantity must be a whole number, zero or more.")?,
            }
        }

        loop {
            let raw = self.prompt(&format!("Price [{:.2}]: ", draft.price))?;
            if raw.is_empty() {
                break;
            }
            match parse_price(&raw) {
                Ok(price) => {
                    draft.price = price;
                    break;
                }
                Err(_) => self.say(Tone::Error, "Price must be a number greater than zero.")?,
            }
        }

        let shown = draft.category.clone().unwrap_or_default();
        let raw = self.prompt(&format!("Category [{shown}]: "))?;
        if let Some(category) = normalize_optional_text(Some(raw.as_str())) {
            draft.category = Some(category);
        }

        match self.products.update(id, &draft).await {
            MutationOutcome::Applied => {
                info!(id = %id, "Product updated");
                self.say(Tone::Success, format!("✅ Product {id} updated."))
            }
            MutationOutcome::NotFound => {
                self.say(Tone::Error, format!("❌ Product {id} no longer exists."))
            }
            MutationOutcome::Failed(reason) => {
                self.say(Tone::Error, format!("❌ Could not update product {id}: {reason}"))
            }
        }
    }

    async fn delete_product(&mut self) -> ShellResult<()> {
        self.say(Tone::Heading, "\n--- Delete Product by ID ---")?;

        let Ok(id) = parse_product_id(&self.prompt("ID of the product to delete: ")?) else {
            return self.say(Tone::Error, "The ID must be a whole number.");
        };

        let confirm = self.prompt(&format!(
            "Are you sure you want to delete product {id}? (y/N): "
        ))?;
        if !matches!(confirm.to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí") {
            return self.say(Tone::Warning, "Deletion cancelled.");
        }

        match self.products.delete(id).await {
            MutationOutcome::Applied => {
                info!(id = %id, "Product deleted");
                self.say(Tone::Success, format!("✅ Product {id} deleted."))
            }
            MutationOutcome::NotFound => {
                self.say(Tone::Error, format!("❌ No product found with ID {id}."))
            }
            MutationOutcome::Failed(reason) => {
                self.say(Tone::Error, format!("❌ Could not delete product {id}: {reason}"))
            }
        }
    }

    async fn search_products(&mut self) -> ShellResult<()> {
        self.say(Tone::Heading, "\n--- Product Search ---")?;
        writeln!(self.output, "Search by:")?;
        writeln!(self.output, "1. ID")?;
        writeln!(self.output, "2. Name")?;
        writeln!(self.output, "3. Category")?;

        let option = self.prompt("Choose a search option (1-3): ")?;
        let value = self.prompt("Value to search for: ")?;

        let field = match option.as_str() {
            "1" => Some(SearchField::Id),
            "2" => Some(SearchField::Name),
            "3" => Some(SearchField::Category),
            _ => None,
        };

        let Some(field) = field.filter(|_| !value.is_empty()) else {
            return self.say(Tone::Error, "Invalid search option or value.");
        };

        let products = self.products.search(field.as_str(), &value).await;

        self.say(Tone::Accent, format!("\nResults for {field} = '{value}':"))?;
        render_table(&mut self.output, &self.palette, &products)?;
        Ok(())
    }

    async fn low_stock_report(&mut self) -> ShellResult<()> {
        self.say(Tone::Heading, "\n--- Low-Stock Report ---")?;

        let raw = self.prompt("Show products with quantity at or below: ")?;
        let Ok(threshold) = parse_threshold(&raw) else {
            return self.say(Tone::Error, "The threshold must be a whole number, zero or more.");
        };

        let products = self.products.low_stock(threshold).await;

        self.say(Tone::Accent, format!("\n--- Products with stock <= {threshold} ---"))?;
        render_table(&mut self.output, &self.palette, &products)?;
        Ok(())
    }

    // =========================================================================
    // Terminal helpers
    // =========================================================================

    fn show_menu(&mut self) -> ShellResult<()> {
        self.palette.clear_screen(&mut self.output)?;

        let rule = "================================================";
        self.say(Tone::Title, rule)?;
        self.say(Tone::Title, "  STOCKPILE INVENTORY MANAGER")?;
        self.say(Tone::Title, rule)?;
        self.say(Tone::Heading, "\n--- MAIN MENU ---")?;

        let entries = [
            "Register new product",
            "List full inventory",
            "Update product (by ID)",
            "Delete product (by ID)",
            "Search products",
            "Low-stock report",
            "Exit",
        ];
        for (n, entry) in entries.iter().enumerate() {
            let tone = if n + 1 == entries.len() { Tone::Error } else { Tone::Accent };
            let number = self.palette.paint(tone, format!("{}.", n + 1));
            writeln!(self.output, "{number} {entry}")?;
        }

        self.say(Tone::Title, "------------------------------------------------")
    }

    /// Writes a prompt and reads one trimmed line.
    ///
    /// A line that is not valid UTF-8 is reported and read as empty.
    fn prompt(&mut self, label: &str) -> ShellResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(ShellError::InputClosed),
            Ok(_) => Ok(line.trim().to_string()),
            // The bad line is already consumed; treat it as an empty answer
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "Discarded unreadable input line");
                self.say(Tone::Error, "Input was not valid text and was ignored.")?;
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn pause(&mut self) -> ShellResult<()> {
        self.prompt("\nPress ENTER to return to the menu...")?;
        Ok(())
    }

    fn say(&mut self, tone: Tone, text: impl AsRef<str>) -> ShellResult<()> {
        writeln!(self.output, "{}", self.palette.paint(tone, text))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Cursor;
    use stockpile_core::{ProductDraft, ProductId};
    use stockpile_db::{Database, DbConfig};

    /// A terminal whose output side is gone.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn store() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    /// Feeds `script` to a fresh shell and returns everything it printed.
    async fn session(repo: &ProductRepository, script: &str) -> String {
        let mut out = Vec::new();
        let mut shell = Shell::new(repo.clone(), Cursor::new(script.to_string()), &mut out, Palette::plain());
        shell.run().await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Register));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[tokio::test]
    async fn test_register_then_list() {
        let (_db, repo) = store().await;

        let output = session(&repo, "1\nWidget\nA widget\n10\n2.50\nTools\n\n2\n\n7\n").await;

        assert!(output.contains("Product 'Widget' registered with id 1."));
        assert!(output.contains("1    | Widget"));
        assert!(output.contains("Goodbye!"));

        let all = repo.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, 2.5);
        assert_eq!(all[0].category.as_deref(), Some("Tools"));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (_db, repo) = store().await;

        let script = concat!(
            "1\n\n\n",                        // blank name
            "1\nWidget\n\n-3\n\n",            // negative quantity
            "1\nWidget\n\n3\n0\n\n",          // zero price
            "7\n",
        );
        let output = session(&repo, script).await;

        assert!(output.contains("Name is required. Operation cancelled."));
        assert!(output.contains("Quantity must be a whole number"));
        assert!(output.contains("Price must be a number greater than zero"));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_option_keeps_session_alive() {
        let (_db, repo) = store().await;

        let output = session(&repo, "9\n\n2\n\n7\n").await;

        assert!(output.contains("Invalid option. Try again."));
        assert!(output.contains("No products found."));
        assert!(output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits_cleanly() {
        let (_db, repo) = store().await;

        let output = session(&repo, "1\nWidget\n").await;

        assert!(!output.contains("Goodbye!"));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_blank_fields() {
        let (_db, repo) = store().await;
        let id = repo
            .insert(&ProductDraft::new("Widget", 10, 2.5).with_description("A widget").with_category("Tools"))
            .await
            .unwrap();

        // Keep name and description, bad quantity then 3, keep price and category
        let output = session(&repo, "3\n1\n\n\nabc\n3\n\n\n\n7\n").await;

        assert!(output.contains("Quantity must be a whole number"));
        assert!(output.contains("Product 1 updated."));

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 3);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("A widget"));
        assert_eq!(product.price, 2.5);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let (_db, repo) = store().await;

        let output = session(&repo, "3\n42\n\n3\nx\n\n7\n").await;

        assert!(output.contains("No product found with ID 42."));
        assert!(output.contains("The ID must be a whole number."));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (_db, repo) = store().await;
        let id = repo.insert(&ProductDraft::new("Widget", 1, 1.0)).await.unwrap();

        let output = session(&repo, "4\n1\nn\n\n4\n1\ny\n\n4\n1\ny\n\n7\n").await;

        assert!(output.contains("Deletion cancelled."));
        assert!(output.contains("Product 1 deleted."));
        assert!(output.contains("No product found with ID 1."));
        assert_eq!(repo.get_by_id(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_and_low_stock() {
        let (_db, repo) = store().await;
        repo.insert(&ProductDraft::new("Widget", 10, 2.5).with_category("Tools"))
            .await
            .unwrap();
        repo.insert(&ProductDraft::new("Gadget", 0, 9.99).with_category("Tools"))
            .await
            .unwrap();

        let output = session(&repo, "5\n2\nGad\n\n6\n0\n\n6\n-1\n\n5\n4\nx\n\n7\n").await;

        assert!(output.contains("Results for name = 'Gad':"));
        assert!(output.contains("2    | Gadget"));
        assert!(output.contains("Products with stock <= 0"));
        assert!(output.contains("The threshold must be a whole number"));
        assert!(output.contains("Invalid search option or value."));
        assert!(!output.contains("1    | Widget"));
        assert_eq!(repo.low_stock(0).await[0].id, ProductId::new(2));
    }

    #[tokio::test]
    async fn test_unreadable_line_is_rejected_not_fatal() {
        let (_db, repo) = store().await;

        let mut script = b"1\n\xff\xfeWidget\n\n".to_vec();
        script.extend_from_slice(b"\xc3\n\n7\n");

        let mut out = Vec::new();
        let mut shell = Shell::new(repo.clone(), Cursor::new(script), &mut out, Palette::plain());
        shell.run().await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(output.matches("Input was not valid text and was ignored.").count(), 2);
        assert!(output.contains("Name is required. Operation cancelled."));
        assert!(output.contains("Invalid option. Try again."));
        assert!(output.contains("Goodbye!"));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_output_failure_ends_session() {
        let (_db, repo) = store().await;

        let mut shell = Shell::new(repo, Cursor::new("7\n"), BrokenPipe, Palette::plain());
        let err = shell.run().await.unwrap_err();

        assert_matches!(err, ShellError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn test_session_changes_persist_in_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        session(&db.products(), "1\nWidget\n\n10\n2.50\nTools\n\n1\nGadget\n\n0\n9.99\n\n\n4\n1\ns\n\n7\n").await;
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let repo = db.products();
        let all = repo.list_all().await;

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, ProductId::new(2));
        assert_eq!(all[0].category, None);
        assert_matches!(repo.delete(ProductId::new(1)).await, MutationOutcome::NotFound);
        assert_matches!(repo.delete(ProductId::new(2)).await, MutationOutcome::Applied);
    }
}
