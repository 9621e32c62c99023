mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{CartCommand, WishlistCommand, cmd_cart, cmd_search, cmd_status, cmd_wishlist};
use output::OutputFormat;

/// cartsync - keep a storefront cart and wishlist in sync with durable storage
#[derive(Parser)]
#[command(name = "cartsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Product catalog (JSON array); defaults to $CARTSYNC_CATALOG or the config directory
  #[arg(long, global = true)]
  catalog: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Inspect and change the cart
  #[command(subcommand)]
  Cart(CartCommand),

  /// Inspect and change the wishlist
  #[command(subcommand)]
  Wishlist(WishlistCommand),

  /// Search the catalog by product name
  Search {
    /// Case-insensitive substring to look for
    query: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show slot locations, expiry and collection sizes
  Status {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let catalog = cli.catalog.as_deref();
  let result = match cli.command {
    Commands::Cart(command) => cmd_cart(command, catalog),
    Commands::Wishlist(command) => cmd_wishlist(command, catalog),
    Commands::Search { query, output } => cmd_search(&query, catalog, output),
    Commands::Status { output } => cmd_status(catalog, output),
  };

  if let Err(e) = result {
    output::print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
