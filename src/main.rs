use anyhow::Context;
use cafe_cart::adapters::catalog::catalog_from_source;
use cafe_cart::core::filter::{categories, find_item, ItemFilter};
use cafe_cart::domain::model::MenuItem;
use cafe_cart::domain::ports::ConfigProvider;
use cafe_cart::utils::error::ErrorSeverity;
use cafe_cart::utils::{logger, validation::Validate};
use cafe_cart::{
    CartError, CartPersistence, CartStore, CheckoutHandoff, CliConfig, Command, ConsolePaymentStage, FileStore,
    TomlConfig,
};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match cli.config.as_deref() {
        Some(path) => Some(
            TomlConfig::from_file(path).with_context(|| format!("loading config file {}", path))?,
        ),
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(TomlConfig::verbose);
    if cli.log_json || file_config.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let result = match &file_config {
        Some(config) => run(&cli.command, config).await,
        None => run(&cli.command, &cli).await,
    };

    if let Err(e) = result {
        tracing::error!("{} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(command: &Command, config: &C) -> cafe_cart::Result<()> {
    config.validate()?;

    // Each invocation is a fresh view: rehydrate from the shared store.
    let persistence = CartPersistence::new(FileStore::new(config.store_dir()));
    let mut cart = CartStore::open(persistence);

    match command {
        Command::Menu { category } => {
            let items = fetch_menu(config).await?;
            let filter = ItemFilter::new(category.as_str(), "");
            print_items(&filter.apply(&items), &cart);
        }
        Command::Categories => {
            let items = fetch_menu(config).await?;
            for category in categories(&items) {
                println!("{}", category);
            }
        }
        Command::Search { query, category } => {
            let items = fetch_menu(config).await?;
            let filter = ItemFilter::new(category.as_str(), query.as_str());
            let matches = filter.apply(&items);
            println!("{}", filter.result_caption(matches.len()));
            print_items(&matches, &cart);
        }
        Command::Add { id } => {
            let items = fetch_menu(config).await?;
            let item = find_item(&items, id).ok_or_else(|| CartError::UnknownItem { id: id.clone() })?;
            cart.add_item(item)?;
            println!("➕ {} × {}", item.name, cart.quantity_of(&item.id));
            println!("🛒 {} items", cart.total_count());
        }
        Command::Remove { id } => {
            cart.remove_id(id)?;
            println!("➖ {} × {}", id, cart.quantity_of(id));
            println!("🛒 {} items", cart.total_count());
        }
        Command::Cart => print_cart(&cart),
        Command::Checkout => {
            let checkout = CheckoutHandoff::new(ConsolePaymentStage::default());
            let handoff = checkout.handoff(&cart)?;
            println!("✅ {}", handoff.summary.checkout_label());
            println!("➡️  {}", checkout.payment_stage().route());
        }
    }

    Ok(())
}

async fn fetch_menu<C: ConfigProvider>(config: &C) -> cafe_cart::Result<Vec<MenuItem>> {
    let catalog = catalog_from_source(
        &config.catalog_source(),
        Duration::from_secs(config.timeout_seconds()),
    )?;
    let items = catalog.fetch_items().await?;
    tracing::debug!("Menu has {} items", items.len());
    Ok(items)
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("₹{:.0}", price)
    } else {
        format!("₹{:.2}", price)
    }
}

fn print_items(items: &[&MenuItem], cart: &CartStore<FileStore>) {
    if items.is_empty() {
        println!("No items found in this category.");
        return;
    }

    for item in items {
        let quantity = cart.quantity_of(&item.id);
        let in_cart = if quantity > 0 {
            format!("  [in cart: {}]", quantity)
        } else {
            String::new()
        };
        println!(
            "{:<6} {:<24} {:>8}  {}{}",
            item.id,
            item.name,
            format_price(item.price),
            item.category,
            in_cart
        );
    }
}

fn print_cart(cart: &CartStore<FileStore>) {
    if !cart.can_checkout() {
        println!("🛒 Your cart is empty");
        return;
    }

    let summary = cart.summary();
    for line in &summary.lines {
        println!(
            "{:<6} {:<24} {:>3} × {:>8} = {:>8}",
            line.id,
            line.name,
            line.quantity,
            format_price(line.price),
            format_price(line.subtotal())
        );
    }
    println!("Total: {}", format_price(summary.total_price));
    println!("{}", summary.checkout_label());
}
