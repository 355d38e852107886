use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gerencia", bin_name = "gerencia", version)]
#[command(
    about = "Products, stock and cash flow for a small business",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    #[command(display_order = 1)]
    Register(RegisterArgs),

    /// Log in and keep the session for later commands
    #[command(display_order = 2)]
    Login { email: String, password: String },

    /// End the current session
    #[command(display_order = 3)]
    Logout,

    /// Show the logged-in user
    #[command(display_order = 4)]
    Whoami,

    /// Check that an account exists for password recovery
    #[command(display_order = 5)]
    Recover { email: String },

    /// Manage products
    #[command(subcommand, alias = "p", display_order = 10)]
    Product(ProductCommands),

    /// Stock levels and status of every product
    #[command(alias = "s", display_order = 11)]
    Stock,

    /// Manage receivables and payables
    #[command(subcommand, alias = "f", display_order = 12)]
    Finance(FinanceCommands),

    /// Overview of products and cash flow
    #[command(alias = "d", display_order = 20)]
    Dashboard,

    /// Totals plus the first entries of each list
    #[command(display_order = 21)]
    Report {
        /// Entries to show per list (defaults to the `report-preview` setting)
        #[arg(long)]
        preview: Option<usize>,
    },

    /// Write the CSV report (relatorio_YYYY-MM-DD.csv)
    #[command(display_order = 22)]
    Export {
        /// Output directory (defaults to the `export-dir` setting)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (report-preview, export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// CPF or CNPJ
    #[arg(long, default_value = "")]
    pub tax_id: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long)]
    pub password: String,

    /// Repeat the password
    #[arg(long)]
    pub confirm: String,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a product
    #[command(alias = "n")]
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        price: f64,
        quantity: u32,
    },

    /// Replace a product's name, price and quantity
    #[command(alias = "e")]
    Edit {
        id: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        price: f64,
        quantity: u32,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete { id: String },

    /// Show a single product
    Show { id: String },

    /// List products, optionally filtered by name
    #[command(alias = "ls")]
    List { filter: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum FinanceCommands {
    /// Record a receivable (default) or payable
    #[command(alias = "n")]
    Add {
        description: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Money owed by the business instead of to it
        #[arg(long)]
        payable: bool,
    },

    /// Delete a movement
    #[command(alias = "rm")]
    Delete { id: String },

    /// List movements with totals
    #[command(alias = "ls")]
    List {
        #[arg(long, conflicts_with = "payable")]
        receivable: bool,

        #[arg(long)]
        payable: bool,
    },
}
