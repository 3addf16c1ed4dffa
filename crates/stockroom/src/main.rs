//! # Stockroom CLI
//!
//! Command-line front end over [`InventorySystem`], backed by a directory of
//! JSON files.
//!
//! ```bash
//! stockroom product add --name Widget --price 9.99 --sku W-1 --quantity 10
//! stockroom adjust W-1 decrease 3
//! stockroom history
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use collection_actor::FileStore;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use stockroom::config::Settings;
use stockroom::lifecycle::{setup_tracing, InventoryError, InventorySystem};
use stockroom::model::{
    AdjustmentRequest, Direction, ProductDraft, ProductId, TransactionKind, UserDraft,
};
use stockroom::notifications::{Notification, Severity};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "stockroom", version, about = "Track products, stock levels and users")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the JSON collections (overrides config and STOCKROOM_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the product catalog
    #[command(subcommand)]
    Product(ProductCommand),
    /// Raise or lower stock for a SKU
    Adjust {
        sku: String,
        direction: DirectionArg,
        amount: String,
    },
    /// Manage users
    #[command(subcommand)]
    User(UserCommand),
    /// Show stock movements, newest first
    History,
}

#[derive(Subcommand)]
enum ProductCommand {
    Add(ProductForm),
    Edit {
        id: String,
        #[command(flatten)]
        form: ProductForm,
    },
    List,
}

#[derive(clap::Args)]
struct ProductForm {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long, default_value = "")]
    sku: String,
    #[arg(long, default_value = "")]
    quantity: String,
}

impl From<ProductForm> for ProductDraft {
    fn from(form: ProductForm) -> Self {
        ProductDraft::new(form.name, form.price, form.sku, form.quantity)
    }
}

#[derive(Subcommand)]
enum UserCommand {
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Increase,
    Decrease,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Increase => Direction::Increase,
            DirectionArg::Decrease => Direction::Decrease,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Setup tracing once for the entire application
    setup_tracing();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    info!(data_dir = %settings.data_dir.display(), "Starting stockroom");

    let store = Arc::new(FileStore::new(&settings.data_dir));
    let system = InventorySystem::new(store, &settings);
    let mut tap = system.notification_tap();

    let outcome = run(&system, cli.command).await;

    // Workflows queue their notification before returning, so it is already
    // in the tap. Other commands only have the error to report.
    match tap.try_recv() {
        Ok(notification) => print_notification(&notification),
        Err(_) => {
            if let Err(e) = &outcome {
                eprintln!("{e}");
            }
        }
    }
    let code = match &outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    };

    system.shutdown().await.context("shutting down")?;
    Ok(code)
}

fn print_notification(notification: &Notification) {
    match notification.severity {
        Severity::Success => println!("{}", notification.message),
        Severity::Error => eprintln!("{}", notification.message),
    }
}

async fn run(system: &InventorySystem, command: Command) -> Result<(), InventoryError> {
    match command {
        Command::Product(ProductCommand::Add(form)) => {
            let product = system.add_product(form.into()).await?;
            println!("{}", product.id);
            Ok(())
        }
        Command::Product(ProductCommand::Edit { id, form }) => {
            system.edit_product(ProductId(id), form.into()).await?;
            Ok(())
        }
        Command::Product(ProductCommand::List) => {
            for p in system.products().await? {
                println!(
                    "{:<14} {:<12} {:<24} {:>10.2} {:>6}",
                    p.id, p.sku, p.name, p.price, p.quantity
                );
            }
            Ok(())
        }
        Command::Adjust {
            sku,
            direction,
            amount,
        } => {
            system
                .adjust_stock(AdjustmentRequest::new(sku, amount, direction.into()))
                .await?;
            Ok(())
        }
        Command::User(UserCommand::Add { name, email }) => {
            let user = system.add_user(UserDraft::new(name, email)).await?;
            println!("{}", user.id);
            Ok(())
        }
        Command::User(UserCommand::List) => {
            for u in system.users().await? {
                println!("{:<14} {:<24} {}", u.id, u.name, u.email);
            }
            Ok(())
        }
        Command::History => {
            for tx in system.history().await? {
                let change = match tx.kind {
                    TransactionKind::QuantityAdjusted {
                        adjustment_type,
                        adjustment_amount,
                        old_quantity,
                        new_quantity,
                    } => format!(
                        "{}{} ({} -> {})",
                        adjustment_type.sign(),
                        adjustment_amount,
                        old_quantity,
                        new_quantity
                    ),
                    TransactionKind::ProductAdded { quantity, .. } => {
                        format!("added with {quantity}")
                    }
                };
                println!(
                    "{}  {:<12} {:<24} {}",
                    tx.timestamp.format("%Y-%m-%d %H:%M"),
                    tx.sku,
                    tx.product_name,
                    change
                );
            }
            Ok(())
        }
    }
}
