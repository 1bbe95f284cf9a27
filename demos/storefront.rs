//! Storefront walkthrough: load a fixture set, apply a promo, and print the
//! cart receipt and the order list.
//!
//! ```sh
//! cargo run --example storefront -- --fixture boutique --promo SAVE10
//! ```

use anyhow::Context;
use clap::Parser;
use tabled::{Table, Tabled};

use atelier::{
    fixtures::Fixture,
    orders::{StatusFilter, actions::available_actions},
    pricing::Pricing,
    promos::PromoBook,
};

/// Arguments for the storefront walkthrough
#[derive(Debug, Parser)]
struct StorefrontArgs {
    /// Fixture set to load the cart and orders from
    #[clap(short, long, default_value = "boutique")]
    fixture: String,

    /// Promo code to apply to the cart
    #[clap(short, long)]
    promo: Option<String>,

    /// Search term for the order list
    #[clap(short, long)]
    search: Option<String>,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    title: String,

    #[tabled(rename = "Variant")]
    variant: String,

    #[tabled(rename = "Qty")]
    quantity: u32,

    #[tabled(rename = "Unit")]
    unit_price: String,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    order_number: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Progress")]
    progress: String,

    #[tabled(rename = "Actions")]
    actions: String,
}

fn main() -> anyhow::Result<()> {
    let args = StorefrontArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)
        .with_context(|| format!("loading fixture set {}", args.fixture))?;

    let mut cart = fixture.cart()?;

    if let Some(code) = &args.promo {
        match cart.apply_promo(code, &PromoBook::boutique()) {
            Ok(percent) => println!("Applied {code}: {percent}% off\n"),
            Err(err) => println!("Promo rejected: {err}\n"),
        }
    }

    let line_rows: Vec<LineRow> = cart
        .iter()
        .map(|line| LineRow {
            title: line.title.clone(),
            variant: [line.size.as_deref(), line.color.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" / "),
            quantity: line.quantity(),
            unit_price: line.unit_price().to_string(),
        })
        .collect();

    println!("{}", Table::new(line_rows));

    let totals = cart.totals(&Pricing::boutique())?;
    println!("\nSubtotal: {}", totals.subtotal);
    println!("Discount: -{}", totals.discount);
    println!("Shipping: {}", totals.shipping);
    println!("Tax:      {}", totals.tax);
    println!("Total:    {}\n", totals.total);

    let book = fixture.order_book();

    let order_rows: Vec<OrderRow> = book
        .list(StatusFilter::All, args.search.as_deref())
        .map(|order| OrderRow {
            order_number: order.order_number().to_string(),
            status: order.status().to_string(),
            progress: format!("{}%", order.status().progress_percent()),
            actions: available_actions(order)
                .iter()
                .map(|action| format!("{action:?}"))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    println!("{}", Table::new(order_rows));

    Ok(())
}
