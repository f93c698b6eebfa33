//! Cart engine command-line front end

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cart_engine::{
    cart::CartStore,
    cli::CartArgs,
    discounts::source::FileDiscountSource,
    storage::JsonFileStorage,
    summary::{parse_currency, write_summary},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CartArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let currency = parse_currency(&args.currency)?;

    let mut cart = CartStore::open(JsonFileStorage::with_key(
        &args.storage_dir,
        &args.storage_key,
    ));

    if let Some(path) = &args.discounts {
        cart.load_discounts(&FileDiscountSource::new(path)).await;
    }

    if let Some(command) = args.action.into_command()? {
        cart.dispatch(command);
    }

    let stdout = io::stdout();
    let handle = stdout.lock();

    write_summary(
        handle,
        cart.state(),
        cart.next_discount_tier().as_ref(),
        currency,
    )?;

    Ok(())
}
