// 🏷️ Category Entity - Two-level taxonomy with stable ids
//
// Categories are reference data: loaded once, never mutated.
//
// - Parent categories carry the direction (expense / income)
// - Subcategories belong to exactly one parent
// - Transactions reference both by id, so renames never break history

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::transaction::TransactionDirection;
use crate::error::{LedgerError, LedgerResult};

// ============================================================================
// CATEGORY ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identity (e.g. "cat-food")
    pub id: String,

    /// Display name (e.g. "Food & Drink")
    pub name: String,

    /// Every transaction filed here must share this direction
    pub direction: TransactionDirection,

    /// Ordered children
    pub children: Vec<Subcategory>,
}

impl Category {
    pub fn new(id: &str, name: &str, direction: TransactionDirection) -> Self {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            direction,
            children: Vec::new(),
        }
    }

    /// Builder-style child registration
    pub fn with_child(mut self, id: &str, name: &str) -> Self {
        self.children.push(Subcategory {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn child(&self, subcategory_id: &str) -> Option<&Subcategory> {
        self.children.iter().find(|c| c.id == subcategory_id)
    }

    pub fn first_child(&self) -> Option<&Subcategory> {
        self.children.first()
    }
}

// ============================================================================
// CATEGORY REGISTRY
// ============================================================================

/// Immutable lookup table: id → category, id → subcategory (+ parent)
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    by_id: HashMap<String, usize>,
    /// subcategory id → (parent index, child index)
    children_by_id: HashMap<String, (usize, usize)>,
}

impl CategoryRegistry {
    /// Build a registry, rejecting duplicate ids anywhere in the tree
    pub fn from_categories(categories: Vec<Category>) -> LedgerResult<Self> {
        let mut by_id = HashMap::new();
        let mut children_by_id = HashMap::new();

        for (pi, category) in categories.iter().enumerate() {
            if by_id.insert(category.id.clone(), pi).is_some() {
                return Err(LedgerError::InvalidTaxonomy(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
            for (ci, child) in category.children.iter().enumerate() {
                if children_by_id.insert(child.id.clone(), (pi, ci)).is_some() {
                    return Err(LedgerError::InvalidTaxonomy(format!(
                        "subcategory {} listed under more than one parent",
                        child.id
                    )));
                }
            }
        }

        for child_id in children_by_id.keys() {
            if by_id.contains_key(child_id) {
                return Err(LedgerError::InvalidTaxonomy(format!(
                    "{} is both a category and a subcategory",
                    child_id
                )));
            }
        }

        Ok(CategoryRegistry {
            categories,
            by_id,
            children_by_id,
        })
    }

    /// Registry with the default taxonomy pre-loaded
    pub fn with_defaults() -> Self {
        CategoryRegistry::from_categories(default_categories())
            .unwrap_or_else(|_| CategoryRegistry::empty())
    }

    pub fn empty() -> Self {
        CategoryRegistry {
            categories: Vec::new(),
            by_id: HashMap::new(),
            children_by_id: HashMap::new(),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id).map(|&i| &self.categories[i])
    }

    /// Find a subcategory and its parent by the subcategory id
    pub fn find_subcategory(&self, id: &str) -> Option<(&Category, &Subcategory)> {
        self.children_by_id.get(id).map(|&(pi, ci)| {
            let parent = &self.categories[pi];
            (parent, &parent.children[ci])
        })
    }

    /// All categories in declaration order
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn count(&self) -> usize {
        self.categories.len()
    }

    /// Get categories by direction, declaration order preserved
    pub fn by_direction(&self, direction: TransactionDirection) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|cat| cat.direction == direction)
            .collect()
    }

    /// "Parent › Child" label, or just the parent name
    ///
    /// Example: ("cat-food", Some("cat-food-coffee")) → "Food & Drink › Coffee & Tea"
    pub fn path_label(&self, category_id: &str, subcategory_id: Option<&str>) -> String {
        let parent = self
            .find_by_id(category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Category");

        match subcategory_id.and_then(|id| self.find_subcategory(id)) {
            Some((_, child)) => format!("{} › {}", parent, child.name),
            None => parent.to_string(),
        }
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Default two-level taxonomy
///
/// Structure:
/// - Living, Food & Drink, Health, Education, Work (Expense)
/// - Salary & Bonus, Investment (Income)
pub fn default_categories() -> Vec<Category> {
    use TransactionDirection::{Expense, Income};

    vec![
        Category::new("cat-living", "Living", Expense)
            .with_child("cat-living-electricity", "Electricity")
            .with_child("cat-living-water", "Water")
            .with_child("cat-living-internet", "Internet & TV"),
        Category::new("cat-food", "Food & Drink", Expense)
            .with_child("cat-food-groceries", "Groceries")
            .with_child("cat-food-dining", "Dining Out")
            .with_child("cat-food-coffee", "Coffee & Tea"),
        Category::new("cat-health", "Health", Expense)
            .with_child("cat-health-medicine", "Medicine")
            .with_child("cat-health-insurance", "Insurance"),
        Category::new("cat-education", "Education", Expense)
            .with_child("cat-education-courses", "Courses")
            .with_child("cat-education-books", "Books"),
        Category::new("cat-work", "Work", Expense)
            .with_child("cat-work-commute", "Commute")
            .with_child("cat-work-office", "Office Supplies"),
        Category::new("cat-salary", "Salary & Bonus", Income)
            .with_child("cat-salary-fixed", "Fixed Salary")
            .with_child("cat-salary-bonus", "Project Bonus"),
        Category::new("cat-investment", "Investment", Income)
            .with_child("cat-investment-dividends", "Stock Dividends")
            .with_child("cat-investment-interest", "Savings Interest"),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_category_registry_initialization() {
        let registry = CategoryRegistry::with_defaults();

        assert_eq!(registry.count(), 7);

        let names: Vec<&str> = registry.all_categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names[0], "Living");
        assert!(names.contains(&"Food & Drink"));
        assert!(names.contains(&"Salary & Bonus"));
    }

    #[test]
    fn test_category_registry_find_by_id() {
        let registry = CategoryRegistry::with_defaults();

        let food = registry.find_by_id("cat-food").unwrap();
        assert_eq!(food.name, "Food & Drink");
        assert_eq!(food.direction, TransactionDirection::Expense);
        assert_eq!(food.children.len(), 3);

        assert!(registry.find_by_id("cat-unknown").is_none());
        // subcategory ids are not parent ids
        assert!(registry.find_by_id("cat-food-coffee").is_none());
    }

    #[test]
    fn test_category_registry_find_subcategory() {
        let registry = CategoryRegistry::with_defaults();

        let (parent, child) = registry.find_subcategory("cat-food-coffee").unwrap();
        assert_eq!(parent.id, "cat-food");
        assert_eq!(child.name, "Coffee & Tea");

        assert!(registry.find_subcategory("cat-food").is_none());
    }

    #[test]
    fn test_category_registry_by_direction() {
        let registry = CategoryRegistry::with_defaults();

        let income = registry.by_direction(TransactionDirection::Income);
        assert_eq!(income.len(), 2);
        assert_eq!(income[0].id, "cat-salary");

        let expense = registry.by_direction(TransactionDirection::Expense);
        assert_eq!(expense.len(), 5);
    }

    #[test]
    fn test_path_label() {
        let registry = CategoryRegistry::with_defaults();

        assert_eq!(
            registry.path_label("cat-living", Some("cat-living-electricity")),
            "Living › Electricity"
        );
        assert_eq!(registry.path_label("cat-living", None), "Living");
        assert_eq!(registry.path_label("cat-nope", None), "Category");
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let categories = vec![
            Category::new("a", "A", TransactionDirection::Expense).with_child("shared", "Shared"),
            Category::new("b", "B", TransactionDirection::Expense).with_child("shared", "Shared"),
        ];

        let err = CategoryRegistry::from_categories(categories).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTaxonomy);
        assert!(err.to_string().contains("more than one parent"));
    }

    #[test]
    fn test_duplicate_parent_rejected() {
        let categories = vec![
            Category::new("a", "A", TransactionDirection::Expense),
            Category::new("a", "Again", TransactionDirection::Income),
        ];

        let err = CategoryRegistry::from_categories(categories).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTaxonomy);
    }

    #[test]
    fn test_every_default_child_belongs_to_its_parent() {
        let registry = CategoryRegistry::with_defaults();

        for category in registry.all_categories() {
            for child in &category.children {
                let (parent, _) = registry.find_subcategory(&child.id).unwrap();
                assert_eq!(parent.id, category.id);
            }
        }
    }
}
