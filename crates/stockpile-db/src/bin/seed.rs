//! # Seed Data Generator
//!
//! Populates the database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p stockpile-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p stockpile-db --bin seed -- --count 1000 --db ./data/inventario.db
//! ```
//!
//! ## Generated Products
//! Each product has:
//! - Name: `{Product} {Size}`
//! - Category: Beverages, Snacks, Dairy, Frozen, Grocery
//! - Price: $0.99 - $19.99
//! - Stock: 0 - 100 (so the low-stock report has something to show)

use clap::Parser;
use stockpile_core::ProductDraft;
use stockpile_db::{Database, DbConfig};

/// Product categories for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Beverages",
        &[
            "Cola",
            "Lemon Soda",
            "Orange Soda",
            "Energy Drink",
            "Sports Drink",
            "Spring Water",
            "Orange Juice",
            "Apple Juice",
            "Iced Tea",
            "Cold Brew",
        ],
    ),
    (
        "Snacks",
        &[
            "Potato Chips",
            "Tortilla Chips",
            "Cheese Puffs",
            "Pretzels",
            "Chocolate Bar",
            "Gummy Bears",
            "Sandwich Cookies",
            "Trail Mix",
            "Popcorn",
            "Rice Cakes",
        ],
    ),
    (
        "Dairy",
        &[
            "Whole Milk",
            "Oat Milk",
            "Cheddar",
            "Mozzarella",
            "Butter",
            "Greek Yogurt",
            "Sour Cream",
            "Eggs",
            "Cottage Cheese",
            "Parmesan",
        ],
    ),
    (
        "Frozen",
        &[
            "Vanilla Ice Cream",
            "Frozen Pizza",
            "Frozen Burrito",
            "Ice Pops",
            "Frozen Peas",
            "Frozen Berries",
            "Waffles",
            "Fish Sticks",
            "Fries",
            "Sorbet",
        ],
    ),
    (
        "Grocery",
        &[
            "White Bread",
            "Spaghetti",
            "Penne",
            "White Rice",
            "Black Beans",
            "Tomato Soup",
            "Oatmeal",
            "Peanut Butter",
            "Honey",
            "Flour",
        ],
    ),
];

/// Size variants and their price addon in cents
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 100),
    ("Large", 250),
    ("Family", 500),
];

/// Stockpile seed data generator
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Fill a Stockpile database with sample products")]
struct Args {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./inventario_dev.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Stockpile Seed Data Generator");
    println!("================================");
    println!("Database: {}", args.db);
    println!("Products: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    let products = db.products();

    println!("✓ Connected to database");
    println!("✓ Schema ready");

    let existing = products.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    let catalog = CATEGORIES.iter().flat_map(|(category, names)| {
        names.iter().flat_map(move |name| {
            SIZES
                .iter()
                .map(move |(size, addon)| (*category, *name, *size, *addon))
        })
    });

    for (seed, (category, name, size, addon)) in catalog.cycle().take(args.count).enumerate() {
        let draft = generate_product(category, name, size, addon, seed);

        if let Err(e) = products.insert(&draft).await {
            eprintln!("Failed to insert {}: {}", draft.name, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let out_of_stock = products.low_stock(0).await;
    println!("  Out of stock: {}", out_of_stock.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic pseudo-random data.
fn generate_product(category: &str, name: &str, size: &str, addon_cents: i64, seed: usize) -> ProductDraft {
    // Base $0.99 - $14.99, plus size addon (max $5.00)
    let base_cents = 99 + ((seed * 37) % 1401) as i64;
    let price = (base_cents + addon_cents) as f64 / 100.0;

    // Stock 0 - 100; every 13th product is sold out
    let quantity = if seed % 13 == 0 { 0 } else { (seed * 7 % 101) as i64 };

    let mut draft = ProductDraft::new(format!("{} {}", name, size), quantity, price).with_category(category);

    if seed % 3 == 0 {
        draft = draft.with_description(format!("{} {} pack", size, name.to_lowercase()));
    }

    draft
}
