//! Category and free-text filtering over the menu.
//!
//! Every function here is pure: results borrow from the input slice and keep
//! the catalog's relative order.

use crate::domain::model::MenuItem;
use std::collections::BTreeSet;

/// Synthetic category that matches every item.
pub const ALL_ITEMS: &str = "All Items";

/// `ALL_ITEMS` followed by the distinct catalog categories in sorted order.
///
/// A catalog category literally named `ALL_ITEMS` is folded into the sentinel.
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let distinct: BTreeSet<&str> = items
        .iter()
        .map(|item| item.category.as_str())
        .filter(|category| *category != ALL_ITEMS)
        .collect();

    std::iter::once(ALL_ITEMS)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

pub fn matches_category(item: &MenuItem, category: &str) -> bool {
    category == ALL_ITEMS || item.category == category
}

/// Case-insensitive substring match on name or description. `lowered_query`
/// must already be lowercase.
fn matches_lowered_query(item: &MenuItem, lowered_query: &str) -> bool {
    item.name.to_lowercase().contains(lowered_query)
        || item.description.to_lowercase().contains(lowered_query)
}

pub fn matches_search(item: &MenuItem, query: &str) -> bool {
    matches_lowered_query(item, &query.to_lowercase())
}

pub fn filter_by_category<'a>(items: &'a [MenuItem], category: &str) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| matches_category(item, category))
        .collect()
}

pub fn filter_by_search<'a>(items: &'a [MenuItem], query: &str) -> Vec<&'a MenuItem> {
    let lowered = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_lowered_query(item, &lowered))
        .collect()
}

pub fn find_item<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    items.iter().find(|item| item.id == id)
}

/// View-local filter state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFilter {
    pub category: String,
    pub query: String,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            category: ALL_ITEMS.to_string(),
            query: String::new(),
        }
    }
}

impl ItemFilter {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
        }
    }

    /// Items passing both the category and the search filter.
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        let lowered = self.query.to_lowercase();
        items
            .iter()
            .filter(|item| matches_category(item, &self.category))
            .filter(|item| matches_lowered_query(item, &lowered))
            .collect()
    }

    pub fn result_caption(&self, count: usize) -> String {
        if self.query.is_empty() {
            format!("Showing {} items", count)
        } else {
            format!("Found {} items for \"{}\"", count, self.query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, description: &str, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: 10.0,
            category: category.to_string(),
            image: String::new(),
        }
    }

    fn catalog() -> Vec<MenuItem> {
        vec![
            item("t1", "Masala Chai", "Spiced milk tea", "Tea"),
            item("c1", "Cappuccino", "Espresso with steamed milk", "Coffee"),
            item("s1", "Samosa", "Crisp pastry", "Snacks"),
            item("t2", "Green Tea", "Light and fresh", "Tea"),
        ]
    }

    fn ids(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn test_categories_sorted_with_sentinel_first() {
        assert_eq!(
            categories(&catalog()),
            vec!["All Items", "Coffee", "Snacks", "Tea"]
        );
        assert_eq!(categories(&[]), vec!["All Items"]);
    }

    #[test]
    fn test_filter_by_category() {
        let items = catalog();
        assert_eq!(ids(&filter_by_category(&items, "Tea")), vec!["t1", "t2"]);
        assert_eq!(
            ids(&filter_by_category(&items, ALL_ITEMS)),
            vec!["t1", "c1", "s1", "t2"]
        );
        assert!(filter_by_category(&items, "Desserts").is_empty());
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let items = catalog();
        assert_eq!(ids(&filter_by_search(&items, "CHAI")), vec!["t1"]);
        assert_eq!(ids(&filter_by_search(&items, "milk")), vec!["t1", "c1"]);
        assert_eq!(filter_by_search(&items, "").len(), 4);
    }

    #[test]
    fn test_item_filter_is_conjunctive() {
        let items = catalog();
        let filter = ItemFilter::new("Tea", "milk");
        assert_eq!(ids(&filter.apply(&items)), vec!["t1"]);

        let filter = ItemFilter::new("Coffee", "chai");
        assert!(filter.apply(&items).is_empty());

        assert_eq!(ItemFilter::default().apply(&items).len(), 4);
    }

    #[test]
    fn test_result_caption() {
        assert_eq!(ItemFilter::default().result_caption(4), "Showing 4 items");
        assert_eq!(
            ItemFilter::new(ALL_ITEMS, "tea").result_caption(2),
            "Found 2 items for \"tea\""
        );
    }
}
