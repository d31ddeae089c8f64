//! Complaint categories as served by the backend.
//!
//! The backend exposes a shallow two-level tree: top-level service areas
//! with optional sub-categories. A complaint is always filed against a
//! leaf node — a top-level category with children is a grouping only.

use crate::error::PortalResult;
use crate::types::CategoryId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_categories: Vec<Category>,
}

impl Category {
    pub fn leaf(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sub_categories: Vec::new(),
        }
    }

    pub fn group(id: &str, name: &str, sub_categories: Vec<Category>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sub_categories,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_categories.is_empty()
    }
}

/// All selectable (leaf) category ids in the tree, in display order.
pub fn leaf_ids(categories: &[Category]) -> Vec<&str> {
    let mut ids = Vec::new();
    for category in categories {
        if category.is_leaf() {
            ids.push(category.id.as_str());
        } else {
            for sub in &category.sub_categories {
                ids.push(sub.id.as_str());
            }
        }
    }
    ids
}

/// Whether `id` names a selectable leaf in the tree.
pub fn is_leaf_id(categories: &[Category], id: &str) -> bool {
    leaf_ids(categories).contains(&id)
}

/// Display name for a category id, searching both levels of the tree.
pub fn find_name<'a>(categories: &'a [Category], id: &str) -> Option<&'a str> {
    for category in categories {
        if category.id == id {
            return Some(category.name.as_str());
        }
        for sub in &category.sub_categories {
            if sub.id == id {
                return Some(sub.name.as_str());
            }
        }
    }
    None
}

/// Supplies the selectable category tree. Backed by the portal's
/// categories endpoint in production; tests and tooling provide
/// in-process implementations.
pub trait CategoryProvider {
    fn categories(&self) -> PortalResult<Vec<Category>>;
}
