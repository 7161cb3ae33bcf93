//! Thambili CLI - Browse the shop, manage a cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! tmb products list --category sarongs
//! tmb products show linen-wrap-trousers
//!
//! # Manage the cart (works signed out via a guest session)
//! tmb cart add prod-102 --quantity 2
//! tmb cart show
//!
//! # Sign in and check out
//! tmb auth login -e you@example.com -p secret --remember
//! tmb checkout place --method card --first-name Nimali --line1 "12 Galle Road" \
//!     --city Colombo --phone "+94 77 123 4567"
//! ```
//!
//! # Commands
//!
//! - `products` - List and inspect products
//! - `collections` - List and inspect collections
//! - `categories` - List product categories
//! - `cart` - Show and edit the cart
//! - `auth` - Sign in, sign out, show the account
//! - `addresses` - Manage saved shipping addresses
//! - `checkout` - List payment methods and place orders
//! - `settings` - Show storefront settings

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use thambili_storefront::{StorefrontClient, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "tmb")]
#[command(author, version, about = "Thambili storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and inspect products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List and inspect collections
    Collections {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// List product categories
    Categories,
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in, sign out, show the account
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage saved shipping addresses
    Addresses {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// List payment methods and place orders
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Show storefront settings (hero image, welcome popup, social login)
    Settings,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, optionally filtered
    List {
        /// Free-text search (bypasses the cache)
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by category id or slug
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by collection id or slug
        #[arg(long)]
        collection: Option<String>,

        /// 1-based page number
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show one product by slug or id
    Show {
        /// Product slug or id
        slug: String,
    },
}

#[derive(Subcommand)]
enum CollectionAction {
    /// List all collections
    List,
    /// Show one collection by id or slug
    Show {
        /// Collection id or slug
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: String,

        /// Variant id (size)
        #[arg(short, long)]
        variant: Option<String>,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line
    Update {
        /// Cart item id (see `tmb cart show`)
        item_id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Cart item id (see `tmb cart show`)
        item_id: String,
    },
    /// Remove every line from the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Keep the session across restarts
        #[arg(short, long)]
        remember: bool,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user's profile
    Me,
}

#[derive(Subcommand)]
enum AddressAction {
    /// List saved shipping addresses
    List,
    /// Save a new shipping address
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Street address
        #[arg(long)]
        line1: String,

        /// Apartment, suite, etc.
        #[arg(long)]
        line2: Option<String>,

        #[arg(long)]
        city: String,

        #[arg(long)]
        postal_code: Option<String>,

        #[arg(long)]
        phone: String,
    },
    /// Delete a saved shipping address
    Remove {
        /// Address id (see `tmb addresses list`)
        id: String,
    },
    /// Mark a saved address as the default
    SetDefault {
        /// Address id (see `tmb addresses list`)
        id: String,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// List available payment methods
    Methods,
    /// Place an order for the current cart
    Place {
        /// Payment method code (see `tmb checkout methods`)
        #[arg(short, long)]
        method: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Street address
        #[arg(long, default_value = "")]
        line1: String,

        /// Apartment, suite, etc.
        #[arg(long, default_value = "")]
        line2: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        postal_code: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Order notes for the shop
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let client = StorefrontClient::new(&config);

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List {
                search,
                category,
                collection,
                page,
            } => {
                commands::catalog::list_products(&client, search, category, collection, page)
                    .await?;
            }
            ProductAction::Show { slug } => commands::catalog::show_product(&client, &slug).await?,
        },
        Commands::Collections { action } => match action {
            CollectionAction::List => commands::catalog::list_collections(&client).await?,
            CollectionAction::Show { id } => commands::catalog::show_collection(&client, &id).await?,
        },
        Commands::Categories => commands::catalog::list_categories(&client).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&client).await?,
            CartAction::Add {
                product_id,
                variant,
                quantity,
            } => commands::cart::add(&client, &product_id, variant.as_deref(), quantity).await?,
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(&client, &item_id, quantity).await?;
            }
            CartAction::Remove { item_id } => commands::cart::remove(&client, &item_id).await?,
            CartAction::Clear => commands::cart::clear(&client).await?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Login {
                email,
                password,
                remember,
            } => commands::account::login(&client, &email, &password, remember).await?,
            AuthAction::Logout => commands::account::logout(&client).await,
            AuthAction::Me => commands::account::me(&client).await?,
        },
        Commands::Addresses { action } => match action {
            AddressAction::List => commands::account::list_addresses(&client).await?,
            AddressAction::Add {
                first_name,
                last_name,
                line1,
                line2,
                city,
                postal_code,
                phone,
            } => {
                commands::account::add_address(
                    &client,
                    thambili_storefront::NewShippingAddress {
                        first_name,
                        last_name,
                        line1,
                        line2,
                        city,
                        postal_code,
                        phone,
                    },
                )
                .await?;
            }
            AddressAction::Remove { id } => commands::account::remove_address(&client, &id).await?,
            AddressAction::SetDefault { id } => {
                commands::account::set_default_address(&client, &id).await?;
            }
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Methods => commands::checkout::list_methods(&client).await?,
            CheckoutAction::Place {
                method,
                first_name,
                last_name,
                line1,
                line2,
                city,
                postal_code,
                phone,
                notes,
            } => {
                let contact = thambili_storefront::ContactForm {
                    first_name,
                    last_name,
                    line1,
                    line2,
                    city,
                    postal_code,
                    phone,
                    notes,
                };
                commands::checkout::place_order(&client, &method, contact).await?;
            }
        },
        Commands::Settings => commands::catalog::show_settings(&client).await?,
    }
    Ok(())
}
