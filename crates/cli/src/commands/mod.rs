//! Subcommand definitions and handlers.

pub mod analytics;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod customers;
pub mod notices;
pub mod sales;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Rows per page for list commands.
pub const PAGE_SIZE: usize = appliance_store_core::pagination::DEFAULT_PAGE_SIZE;

#[derive(Subcommand)]
pub enum PasswordResetAction {
    /// Email a recovery token
    Request {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with a recovery token
    Confirm {
        #[arg(long)]
        token: String,
        #[arg(long, env = "STORE_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat the new password
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    Show,
    /// Add units of a product
    Add {
        product_id: i32,
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove units of a product (never below one)
    Decrement {
        product_id: i32,
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product line
    Remove { product_id: i32 },
    /// Empty the cart
    Clear,
    /// Place the cart as an order
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        phone: String,
    },
}

#[derive(Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: rust_decimal::Decimal,
    #[arg(long)]
    pub cost: rust_decimal::Decimal,
    #[arg(long, default_value_t = 0)]
    pub stock: u32,
    #[arg(long, default_value_t = 1)]
    pub warranty_years: u32,
    #[arg(long)]
    pub category: i32,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products
    Products {
        /// Only products that can be sold now
        #[arg(long)]
        available: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product
    Product { id: i32 },
    /// Create a product
    ProductCreate(ProductArgs),
    /// Change price, stock or status of a product
    ProductUpdate {
        id: i32,
        #[arg(long)]
        price: Option<rust_decimal::Decimal>,
        #[arg(long)]
        stock: Option<u32>,
        /// Disponible, Agotado or Descontinuado
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a product
    ProductDelete { id: i32 },
    /// List categories
    Categories,
    /// Create a category
    CategoryCreate {
        name: String,
        #[arg(long)]
        inactive: bool,
    },
    /// Rename a category or change its state
    CategoryUpdate {
        id: i32,
        name: String,
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a category
    CategoryDelete { id: i32 },
    /// List warehouses
    Warehouses,
    /// Create a warehouse
    WarehouseCreate {
        code: String,
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a warehouse
    WarehouseDelete { id: i32 },
    /// List stock entries
    StockEntries,
    /// Record received stock
    AddStock {
        #[arg(long)]
        warehouse: i32,
        #[arg(long)]
        product: i32,
        #[arg(long)]
        qty: u32,
    },
}

#[derive(Args)]
pub struct CustomerArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Required when creating
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List customers
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a customer
    Create(CustomerArgs),
    /// Replace a customer's details
    Update {
        id: i32,
        #[command(flatten)]
        details: CustomerArgs,
    },
    /// Delete a customer
    Delete { id: i32 },
    /// Activate or deactivate a customer
    Toggle { id: i32 },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// List accounts
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create an account
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long, default_value = "CLIENTE")]
        role: String,
        #[arg(long)]
        password: String,
    },
    /// Delete an account
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum SaleAction {
    /// Sales history
    List {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<chrono::NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<chrono::NaiveDate>,
        #[arg(long)]
        customer: Option<i32>,
        /// Mostrador or Telefono
        #[arg(long)]
        channel: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one sale
    Show { id: i32 },
    /// Register a counter sale
    Register {
        /// Customer profile id
        #[arg(long)]
        customer: i32,
        /// Mostrador or Telefono
        #[arg(long, default_value = "Mostrador")]
        channel: String,
        /// `PRODUCT_ID:QTY`, repeatable
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    /// Download the PDF receipt
    Receipt {
        id: i32,
        /// Output file (default: nota_venta_<id>.pdf)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Predicted sales
    Forecast {
        #[arg(long)]
        category: Option<i32>,
        /// 3, 6 or 12
        #[arg(long, default_value_t = 3)]
        months: u32,
    },
    /// Monthly sales history
    Trends,
}

#[derive(Args)]
pub struct NoticeArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub message: String,
    /// Default: Informativo
    #[arg(long)]
    pub kind: Option<String>,
    /// Default: Activo
    #[arg(long)]
    pub status: Option<String>,
    /// Default: 1
    #[arg(long)]
    pub priority: Option<i32>,
    #[arg(long)]
    pub scheduled_for: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub action_link: Option<String>,
}

#[derive(Subcommand)]
pub enum NoticeAction {
    /// List notices
    List {
        /// Only active notices
        #[arg(long)]
        active: bool,
    },
    /// Show one notice
    Show { id: i32 },
    /// Create a notice
    Create(NoticeArgs),
    /// Replace a notice
    Update {
        id: i32,
        #[command(flatten)]
        notice: NoticeArgs,
    },
    /// Set a notice's status
    SetStatus { id: i32, status: String },
    /// Delete a notice
    Delete { id: i32 },
    /// Send a notice now
    Send { id: i32 },
    /// Delivery statistics
    Stats { id: i32 },
}
