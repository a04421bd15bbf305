//! # Table Rendering
//!
//! Fixed-width product tables and optional ANSI color.
//!
//! Color is a capability carried by [`Palette`] and handed to whoever
//! renders; there is no process-wide color switch.

use std::io::{self, Write};

use stockpile_core::Product;

const ID_W: usize = 4;
const NAME_W: usize = 20;
const DESCRIPTION_W: usize = 30;
const QUANTITY_W: usize = 10;
const PRICE_W: usize = 8;
const CATEGORY_W: usize = 15;

const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Semantic text roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Heading,
    Accent,
    Success,
    Warning,
    Error,
}

impl Tone {
    const fn ansi(self) -> &'static str {
        match self {
            Tone::Title => "\x1b[1;32m",
            Tone::Heading => "\x1b[33m",
            Tone::Accent => "\x1b[36m",
            Tone::Success => "\x1b[32m",
            Tone::Warning => "\x1b[33m",
            Tone::Error => "\x1b[31m",
        }
    }
}

/// Output color capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// A palette that emits ANSI sequences when `enabled`.
    pub const fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// A palette that never emits escape sequences.
    pub const fn plain() -> Self {
        Palette { enabled: false }
    }

    /// Wraps `text` in the color for `tone`, or returns it unchanged.
    pub fn paint(&self, tone: Tone, text: impl AsRef<str>) -> String {
        if self.enabled {
            format!("{}{}{}", tone.ansi(), text.as_ref(), RESET)
        } else {
            text.as_ref().to_string()
        }
    }

    /// Clears the terminal. A no-op for plain output.
    pub fn clear_screen(&self, out: &mut impl Write) -> io::Result<()> {
        if self.enabled {
            write!(out, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }
}

/// Cuts `text` to at most `width` characters.
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn header_line() -> String {
    format!(
        "{:<ID_W$} | {:<NAME_W$} | {:<DESCRIPTION_W$} | {:<QUANTITY_W$} | {:<PRICE_W$} | {:<CATEGORY_W$}",
        "ID", "NAME", "DESCRIPTION", "QTY", "PRICE", "CATEGORY"
    )
}

/// Formats one product as a table row.
pub fn product_row(product: &Product) -> String {
    format!(
        "{:<ID_W$} | {:<NAME_W$} | {:<DESCRIPTION_W$} | {:<QUANTITY_W$} | {:<PRICE_W$.2} | {:<CATEGORY_W$}",
        product.id.get(),
        fit(&product.name, NAME_W),
        fit(product.description.as_deref().unwrap_or_default(), DESCRIPTION_W),
        product.quantity,
        product.price,
        fit(product.category.as_deref().unwrap_or_default(), CATEGORY_W),
    )
}

/// Writes `products` as a table, or a notice when there are none.
///
/// Sold-out rows are painted as errors.
pub fn render_table(out: &mut impl Write, palette: &Palette, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        writeln!(out, "\n{}", palette.paint(Tone::Warning, "[!] No products found."))?;
        return Ok(());
    }

    let header = header_line();
    let separator = "-".repeat(header.chars().count());

    writeln!(out)?;
    writeln!(out, "{}", palette.paint(Tone::Accent, &separator))?;
    writeln!(out, "{}", palette.paint(Tone::Accent, &header))?;
    writeln!(out, "{}", palette.paint(Tone::Accent, &separator))?;

    for product in products {
        let row = product_row(product);
        if product.is_out_of_stock() {
            writeln!(out, "{}", palette.paint(Tone::Error, row))?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }

    writeln!(out, "{}", palette.paint(Tone::Accent, &separator))?;
    writeln!(out)?;
    Ok(())
}
