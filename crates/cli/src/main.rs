//! Tillpoint CLI - Database management and billing operations.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema migrations
//! till migrate
//!
//! # Seed the default catalog (no-op if products already exist)
//! till seed
//!
//! # Register a customer; prints the generated bill number
//! till customer register -n "Asha Rao" -m +919876543210 -e asha@example.com
//!
//! # Build up a cart and pay
//! till cart add --bill 4217 --product Raymond --quantity 5
//! till cart show --bill 4217
//! till bill pay --bill 4217
//!
//! # Look up a paid bill later
//! till bill find --bill 4217
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply database migrations
//! - `seed` - Seed the default product catalog
//! - `catalog` - Browse categories, sub-categories, and products
//! - `customer register` - Register a customer and generate a bill number
//! - `cart add` / `cart show` - Reserve items and display the running bill
//! - `bill pay` / `bill find` - Finalize a bill, search paid bills

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "till")]
#[command(author, version, about = "Tillpoint billing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Seed the default product catalog
    Seed,
    /// Browse the catalog taxonomy
    Catalog {
        /// Limit to one category
        #[arg(short, long)]
        category: Option<String>,

        /// Limit to one sub-category (requires --category)
        #[arg(short, long, requires = "category")]
        sub_category: Option<String>,
    },
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Build up a bill's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Finalize and search bills
    Bill {
        #[command(subcommand)]
        action: BillAction,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Register a new customer and generate their bill number
    Register {
        /// Customer display name
        #[arg(short, long)]
        name: String,

        /// Mobile number (digits, optional leading +)
        #[arg(short, long)]
        mobile: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Reserve a quantity of a product into a bill's cart
    Add {
        /// Bill number
        #[arg(short, long)]
        bill: i64,

        /// Catalog product name
        #[arg(short, long)]
        product: String,

        /// Units to reserve
        #[arg(short, long)]
        quantity: i64,
    },
    /// Display the bill's cart and grand total
    Show {
        /// Bill number
        #[arg(short, long)]
        bill: i64,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum BillAction {
    /// Pay the bill: record the total and clear the cart
    Pay {
        /// Bill number
        #[arg(short, long)]
        bill: i64,

        /// Emit the receipt as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up a previously paid bill
    Find {
        /// Bill number
        #[arg(short, long)]
        bill: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Catalog {
            category,
            sub_category,
        } => commands::catalog::browse(category.as_deref(), sub_category.as_deref()).await?,
        Commands::Customer { action } => match action {
            CustomerAction::Register {
                name,
                mobile,
                email,
            } => commands::customer::register(&name, &mobile, &email).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                bill,
                product,
                quantity,
            } => commands::cart::add(bill, &product, quantity).await?,
            CartAction::Show { bill, json } => commands::cart::show(bill, json).await?,
        },
        Commands::Bill { action } => match action {
            BillAction::Pay { bill, json } => commands::bill::pay(bill, json).await?,
            BillAction::Find { bill } => commands::bill::find(bill).await?,
        },
    }
    Ok(())
}
