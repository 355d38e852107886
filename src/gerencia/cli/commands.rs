//! Dispatch from parsed arguments to the API.
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API and the restored session
//! - `handle_*()`: Per-command handlers that call the API and print results
//!
//! The data directory is `$GERENCIA_HOME` when set, the OS data directory
//! otherwise.

use super::print::{
    print_config, print_dashboard, print_finance_summary, print_messages, print_movements,
    print_product_detail, print_products, print_report, print_stock, print_user,
};
use super::setup::{Cli, Commands, FinanceCommands, ProductCommands, RegisterArgs};
use clap::Parser;
use directories::ProjectDirs;
use gerencia::api::{ConfigAction, GerenciaApi, GerenciaPaths, Registration};
use gerencia::error::{GerenciaError, Result};
use gerencia::model::{MovementKind, Session};
use gerencia::store::fs::FileStore;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "GERENCIA_HOME";

struct AppContext {
    api: GerenciaApi<FileStore>,
    session: Session,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context()?;

    match cli.command {
        Commands::Register(args) => handle_register(&mut ctx, args),
        Commands::Login { email, password } => handle_login(&mut ctx, &email, &password),
        Commands::Logout => handle_logout(&mut ctx),
        Commands::Whoami => handle_whoami(&ctx),
        Commands::Recover { email } => handle_recover(&ctx, &email),
        Commands::Product(cmd) => handle_product(&mut ctx, cmd),
        Commands::Stock => handle_stock(&ctx),
        Commands::Finance(cmd) => handle_finance(&mut ctx, cmd),
        Commands::Dashboard => handle_dashboard(&ctx),
        Commands::Report { preview } => handle_report(&ctx, preview),
        Commands::Export { dir } => handle_export(&ctx, dir),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "gerencia", "gerencia").ok_or_else(|| {
        GerenciaError::Config(format!(
            "Could not determine a data directory; set {}",
            HOME_ENV
        ))
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let data = data_dir()?;
    debug!(data_dir = %data.display(), "using data directory");

    let api = GerenciaApi::new(FileStore::new(data.clone()), GerenciaPaths { data });
    let session = api.restore_session();
    Ok(AppContext { api, session })
}

fn handle_register(ctx: &mut AppContext, args: RegisterArgs) -> Result<()> {
    let result = ctx.api.register(Registration {
        name: args.name,
        email: args.email,
        tax_id: args.tax_id,
        phone: args.phone,
        secret: args.password,
        confirmation: args.confirm,
    })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_login(ctx: &mut AppContext, email: &str, password: &str) -> Result<()> {
    ctx.session = ctx.api.login(email, password)?;
    if let Some(user) = ctx.session.user() {
        println!("Logged in as {}", user.email);
    }
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let was_logged_in = ctx.session.is_authenticated();
    ctx.session = ctx.api.logout()?;
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session.user() {
        Some(user) => print_user(user),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn handle_recover(ctx: &AppContext, email: &str) -> Result<()> {
    let result = ctx.api.recover(email)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_product(ctx: &mut AppContext, cmd: ProductCommands) -> Result<()> {
    let session = &ctx.session;
    let result = match cmd {
        ProductCommands::Add {
            name,
            price,
            quantity,
        } => ctx.api.create_product(session, name, price, quantity)?,
        ProductCommands::Edit {
            id,
            name,
            price,
            quantity,
        } => ctx.api.update_product(session, &id, name, price, quantity)?,
        ProductCommands::Delete { id } => ctx.api.delete_product(session, &id)?,
        ProductCommands::Show { id } => {
            let result = ctx.api.get_product(session, &id)?;
            for product in &result.products {
                print_product_detail(product);
            }
            return Ok(());
        }
        ProductCommands::List { filter } => {
            let result = ctx.api.list_products(session, filter.as_deref())?;
            print_products(&result.products);
            return Ok(());
        }
    };

    print_messages(&result.messages);
    Ok(())
}

fn handle_stock(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stock(&ctx.session)?;
    if let Some(summary) = &result.stock {
        print_stock(&result.products, summary);
    }
    Ok(())
}

fn handle_finance(ctx: &mut AppContext, cmd: FinanceCommands) -> Result<()> {
    let session = &ctx.session;
    let result = match cmd {
        FinanceCommands::Add {
            description,
            amount,
            payable,
        } => {
            let kind = if payable {
                MovementKind::Payable
            } else {
                MovementKind::Receivable
            };
            ctx.api.append_movement(session, description, amount, kind)?
        }
        FinanceCommands::Delete { id } => ctx.api.delete_movement(session, &id)?,
        FinanceCommands::List {
            receivable,
            payable,
        } => {
            let kind = match (receivable, payable) {
                (true, _) => Some(MovementKind::Receivable),
                (_, true) => Some(MovementKind::Payable),
                _ => None,
            };
            let result = ctx.api.list_movements(session, kind)?;
            print_movements(&result.movements);
            if let Some(summary) = &result.finance {
                print_finance_summary(summary);
            }
            return Ok(());
        }
    };

    print_messages(&result.messages);
    Ok(())
}

fn handle_dashboard(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.dashboard(&ctx.session)?;
    if let Some(snapshot) = &result.dashboard {
        print_dashboard(ctx.session.user(), snapshot);
    }
    Ok(())
}

fn handle_report(ctx: &AppContext, preview: Option<usize>) -> Result<()> {
    let result = ctx.api.report(&ctx.session, preview)?;
    if let Some(rollup) = &result.report {
        print_report(rollup);
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, dir: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(&ctx.session, dir.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
