use crate::domain::model::{Cart, CartInvariantViolation, CartLine};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-known key every view reads and writes the cart under.
pub const CART_KEY: &str = "cart";

/// Schema tag embedded in every stored cart.
pub const CART_SCHEMA: &str = "cafe-cart/v1";

#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    schema: String,
    saved_at: DateTime<Utc>,
    lines: Vec<CartLine>,
}

#[derive(Debug, Error)]
pub enum CorruptCart {
    #[error("unparseable cart: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported cart schema '{0}'")]
    UnknownSchema(String),

    #[error("stored cart is not a JSON object or array")]
    UnexpectedShape,

    #[error("stored cart breaks an invariant: {0}")]
    Invariant(#[from] CartInvariantViolation),
}

/// Write-through mirror of a cart in a [`KeyValueStore`].
///
/// Each view owns its own in-memory cart; this is the only place views
/// exchange state, so the stored value is the canonical cart. Last write wins.
#[derive(Debug, Clone)]
pub struct CartPersistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CartPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrites the stored cart with `cart`.
    pub fn save(&self, cart: &Cart) -> Result<()> {
        let encoded = Self::encode(cart)?;
        self.store.set(CART_KEY, &encoded)?;
        tracing::debug!(
            "Saved cart: {} lines, {} items",
            cart.lines().len(),
            cart.total_count()
        );
        Ok(())
    }

    /// Reads the stored cart. Missing data yields an empty cart; corrupt data
    /// is deleted and also yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                tracing::warn!("Could not read stored cart, starting empty: {}", e);
                return Cart::new();
            }
        };

        match Self::decode(&raw) {
            Ok(cart) => {
                tracing::debug!("Loaded cart with {} items", cart.total_count());
                cart
            }
            Err(reason) => {
                tracing::warn!("Discarding corrupt stored cart: {}", reason);
                if let Err(e) = self.clear() {
                    tracing::warn!("Could not clear corrupt cart: {}", e);
                }
                Cart::new()
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.store.delete(CART_KEY)
    }

    pub fn encode(cart: &Cart) -> Result<String> {
        let stored = StoredCart {
            schema: CART_SCHEMA.to_string(),
            saved_at: Utc::now(),
            lines: cart.lines().to_vec(),
        };
        Ok(serde_json::to_string(&stored)?)
    }

    /// Accepts the current envelope and the legacy bare array of lines.
    pub fn decode(raw: &str) -> std::result::Result<Cart, CorruptCart> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let lines = match value {
            serde_json::Value::Array(_) => serde_json::from_value::<Vec<CartLine>>(value)?,
            serde_json::Value::Object(_) => {
                let stored: StoredCart = serde_json::from_value(value)?;
                if stored.schema != CART_SCHEMA {
                    return Err(CorruptCart::UnknownSchema(stored.schema));
                }
                stored.lines
            }
            _ => return Err(CorruptCart::UnexpectedShape),
        };
        Ok(Cart::from_lines(lines)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::model::MenuItem;

    fn chai() -> MenuItem {
        MenuItem {
            id: "t1".to_string(),
            name: "Masala Chai".to_string(),
            description: "Spiced milk tea".to_string(),
            price: 20.0,
            category: "Tea".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let persistence = CartPersistence::new(MemoryStore::new());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_writes_schema_tag() {
        let store = MemoryStore::new();
        let persistence = CartPersistence::new(&store);
        let mut cart = Cart::new();
        cart.increment(&chai()).unwrap();

        persistence.save(&cart).unwrap();

        let raw = store.get(CART_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema"], CART_SCHEMA);
        assert_eq!(value["lines"][0]["id"], "t1");
        assert_eq!(value["lines"][0]["quantity"], 1);
    }

    #[test]
    fn test_prices_read_back_bit_identical() {
        let prices = [0.1 + 0.2, 1.0 / 3.0, 5e-324, 1e-310, f64::MIN_POSITIVE, f64::MAX, 19.99];
        let lines = prices
            .iter()
            .enumerate()
            .map(|(i, price)| CartLine {
                id: format!("p{}", i),
                name: "Odd price".to_string(),
                price: *price,
                quantity: 1,
            })
            .collect();
        let cart = Cart::from_lines(lines).unwrap();

        let store = MemoryStore::new();
        let persistence = CartPersistence::new(&store);
        persistence.save(&cart).unwrap();
        let loaded = persistence.load();

        for (stored, original) in loaded.lines().iter().zip(cart.lines()) {
            assert_eq!(stored.price.to_bits(), original.price.to_bits());
        }
        assert_eq!(loaded, cart);
    }

    #[test]
    fn test_decode_legacy_array() {
        let cart = CartPersistence::<MemoryStore>::decode(
            r#"[{"id":"t1","name":"Masala Chai","price":20,"quantity":2}]"#,
        )
        .unwrap();
        assert_eq!(cart.quantity_of("t1"), 2);
        assert_eq!(cart.total_price(), 40.0);
    }

    #[test]
    fn test_decode_rejects_unknown_schema() {
        let raw = r#"{"schema":"cafe-cart/v9","saved_at":"2026-01-01T00:00:00Z","lines":[]}"#;
        assert!(matches!(
            CartPersistence::<MemoryStore>::decode(raw),
            Err(CorruptCart::UnknownSchema(schema)) if schema == "cafe-cart/v9"
        ));
    }

    #[test]
    fn test_decode_rejects_partial_content() {
        let raw = r#"[{"id":"t1","name":"Chai","price":20,"quantity":1},{"id":"t1","name":"Chai","price":20,"quantity":1}]"#;
        assert!(matches!(
            CartPersistence::<MemoryStore>::decode(raw),
            Err(CorruptCart::Invariant(_))
        ));
        assert!(matches!(
            CartPersistence::<MemoryStore>::decode("42"),
            Err(CorruptCart::UnexpectedShape)
        ));
    }

    #[test]
    fn test_corrupt_value_is_cleared() {
        let store = MemoryStore::new();
        store.set(CART_KEY, "{not json").unwrap();

        let cart = CartPersistence::new(&store).load();

        assert!(cart.is_empty());
        assert_eq!(store.get(CART_KEY).unwrap(), None);
    }
}
