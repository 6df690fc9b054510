use anyhow::Result;
use cafe_cart::core::filter::{categories, filter_by_category, filter_by_search};
use cafe_cart::core::persistence::CART_KEY;
use cafe_cart::domain::ports::{KeyValueStore, MenuCatalog, PaymentStage};
use cafe_cart::{
    CartError, CartPersistence, CartStore, CartSummary, CheckoutHandoff, ItemFilter, MemoryStore, MenuItem,
    StaticCatalog, ALL_ITEMS,
};
use std::sync::Mutex;

fn menu_item(id: &str, name: &str, description: &str, price: f64, category: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: format!("/images/{}.jpg", id),
    }
}

fn cafe_catalog() -> StaticCatalog {
    StaticCatalog::new(vec![
        menu_item("t1", "Masala Chai", "Spiced Indian tea", 20.0, "Tea"),
        menu_item("c1", "Cappuccino", "Espresso with foamed milk", 60.0, "Coffee"),
    ])
}

#[derive(Default)]
struct RecordingPayment {
    summaries: Mutex<Vec<CartSummary>>,
}

impl PaymentStage for RecordingPayment {
    fn begin_payment(&self, summary: &CartSummary) -> cafe_cart::Result<()> {
        self.summaries.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_add_remove_scenario() -> Result<()> {
    let items = cafe_catalog().fetch_items().await?;
    let chai = &items[0];
    let store = MemoryStore::new();
    let mut cart = CartStore::open(CartPersistence::new(store.clone()));

    cart.add_item(chai)?;
    assert_eq!(cart.quantity_of("t1"), 1);
    assert_eq!(cart.total_count(), 1);
    assert_eq!(cart.total_price(), 20.0);

    cart.add_item(chai)?;
    assert_eq!(cart.quantity_of("t1"), 2);
    assert_eq!(cart.total_price(), 40.0);

    cart.remove_item(chai)?;
    assert_eq!(cart.quantity_of("t1"), 1);
    assert_eq!(cart.total_price(), 20.0);

    cart.remove_item(chai)?;
    assert!(cart.cart().is_empty());
    assert_eq!(cart.total_count(), 0);

    let reopened = CartStore::open(CartPersistence::new(store));
    assert!(reopened.cart().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_filter_scenarios() -> Result<()> {
    let items = cafe_catalog().fetch_items().await?;

    let coffee: Vec<&str> = filter_by_category(&items, "Coffee")
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(coffee, vec!["c1"]);

    let all: Vec<&str> = filter_by_category(&items, ALL_ITEMS)
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(all, vec!["t1", "c1"]);

    let chai: Vec<&str> = filter_by_search(&items, "chai")
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(chai, vec!["t1"]);
    assert!(filter_by_search(&items, "xyz").is_empty());

    assert_eq!(categories(&items), vec!["All Items", "Coffee", "Tea"]);
    assert_eq!(ItemFilter::new("Tea", "MILK").apply(&items).len(), 0);
    assert_eq!(ItemFilter::new(ALL_ITEMS, "MILK").apply(&items).len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_checkout_scenario() -> Result<()> {
    let items = cafe_catalog().fetch_items().await?;
    let store = MemoryStore::new();
    let mut cart = CartStore::open(CartPersistence::new(store.clone()));
    let checkout = CheckoutHandoff::new(RecordingPayment::default());

    assert!(!cart.can_checkout());
    assert!(matches!(checkout.handoff(&cart), Err(CartError::EmptyCart)));

    cart.add_item(&items[1])?;
    let handoff = checkout.handoff(&cart)?;
    assert_eq!(handoff.summary.item_count, 1);
    assert_eq!(handoff.summary.total_price, 60.0);

    let stored = store.get(CART_KEY)?.expect("cart was persisted");
    assert_eq!(&CartPersistence::<MemoryStore>::decode(&stored)?, cart.cart());

    // The cart survives the handoff.
    assert_eq!(cart.quantity_of("c1"), 1);
    let payment_view = CartStore::open(CartPersistence::new(store));
    assert_eq!(payment_view.quantity_of("c1"), 1);

    assert_eq!(checkout.payment_stage().summaries.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_menu_and_search_views_converge() -> Result<()> {
    let items = cafe_catalog().fetch_items().await?;
    let store = MemoryStore::new();

    let mut menu_view = CartStore::open(CartPersistence::new(store.clone()));
    menu_view.add_item(&items[0])?;
    menu_view.add_item(&items[1])?;

    let mut search_view = CartStore::open(CartPersistence::new(store.clone()));
    assert_eq!(search_view.cart(), menu_view.cart());

    search_view.add_item(&items[0])?;
    menu_view.reload();
    assert_eq!(menu_view.quantity_of("t1"), 2);
    assert_eq!(menu_view.total_price(), 100.0);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_views_last_write_wins() -> Result<()> {
    let items = cafe_catalog().fetch_items().await?;
    let store = MemoryStore::new();

    let mut first = CartStore::open(CartPersistence::new(store.clone()));
    let mut second = CartStore::open(CartPersistence::new(store.clone()));

    first.add_item(&items[0])?;
    second.add_item(&items[1])?;

    // The second view never saw the chai, and its write replaced the first.
    let after = CartStore::open(CartPersistence::new(store));
    assert_eq!(after.quantity_of("t1"), 0);
    assert_eq!(after.quantity_of("c1"), 1);
    Ok(())
}

#[tokio::test]
async fn test_price_snapshot_survives_catalog_change() -> Result<()> {
    let store = MemoryStore::new();
    let mut cart = CartStore::open(CartPersistence::new(store));

    cart.add_item(&menu_item("c1", "Cappuccino", "", 60.0, "Coffee"))?;
    let repriced = menu_item("c1", "Cappuccino (large)", "", 80.0, "Coffee");
    cart.add_item(&repriced)?;

    let line = cart.cart().get("c1").expect("line exists");
    assert_eq!(line.name, "Cappuccino");
    assert_eq!(line.price, 60.0);
    assert_eq!(cart.total_price(), 120.0);
    Ok(())
}
