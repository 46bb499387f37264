//! The bundled trust taxonomy.
//!
//! An ordered list of categories, each holding an ordered list of
//! patterns with stable `"category:suffix"` ids. Pattern ids are the
//! keys a user's auto-approve preference set stores; the only contract
//! beyond the data itself is id uniqueness, checked by [`validate`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named rule used to classify a kind of diff change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustPattern {
    pub id: String,
    pub category: String,
    pub name: String,
    pub description: String,
}

/// A group of related trust patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub patterns: Vec<TrustPattern>,
}

fn pattern(category: &str, suffix: &str, name: &str, description: &str) -> TrustPattern {
    TrustPattern {
        id: format!("{category}:{suffix}"),
        category: category.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
    }
}

/// The full bundled taxonomy, in display order.
pub fn taxonomy() -> Vec<TrustCategory> {
    vec![
        TrustCategory {
            id: "imports".to_owned(),
            name: "Imports".to_owned(),
            description: "Changes to import statements".to_owned(),
            patterns: vec![
                pattern("imports", "added", "Added", "New import statements added"),
                pattern("imports", "removed", "Removed", "Import statements removed"),
                pattern("imports", "reordered", "Reordered", "Import statements reordered"),
            ],
        },
        TrustCategory {
            id: "formatting".to_owned(),
            name: "Formatting".to_owned(),
            description: "Code style and formatting changes".to_owned(),
            patterns: vec![
                pattern(
                    "formatting",
                    "whitespace",
                    "Whitespace",
                    "Whitespace-only changes (spaces, tabs, blank lines)",
                ),
                pattern(
                    "formatting",
                    "line-length",
                    "Line length",
                    "Line wrapping for length limits",
                ),
                pattern(
                    "formatting",
                    "style",
                    "Style",
                    "Code style changes (semicolons, quotes, etc.)",
                ),
            ],
        },
        TrustCategory {
            id: "comments".to_owned(),
            name: "Comments".to_owned(),
            description: "Changes to code comments".to_owned(),
            patterns: vec![
                pattern("comments", "added", "Added", "New comments added"),
                pattern("comments", "removed", "Removed", "Comments removed"),
                pattern("comments", "modified", "Modified", "Comments updated or corrected"),
            ],
        },
    ]
}

/// Iterate every pattern id in the taxonomy, in order.
pub fn pattern_ids(categories: &[TrustCategory]) -> impl Iterator<Item = &str> {
    categories
        .iter()
        .flat_map(|c| c.patterns.iter().map(|p| p.id.as_str()))
}

/// Check the one invariant consumers rely on: category and pattern ids
/// are unique, and each pattern belongs to (and is prefixed by) its
/// parent category.
pub fn validate(categories: &[TrustCategory]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();

    for category in categories {
        if !seen.insert(category.id.as_str()) {
            return Err(CoreError::Validation {
                message: format!("duplicate trust category id: {}", category.id),
            });
        }

        for p in &category.patterns {
            if !seen.insert(p.id.as_str()) {
                return Err(CoreError::Validation {
                    message: format!("duplicate trust pattern id: {}", p.id),
                });
            }
            if p.category != category.id {
                return Err(CoreError::Validation {
                    message: format!(
                        "pattern {} claims category {}, listed under {}",
                        p.id, p.category, category.id
                    ),
                });
            }
            if !p.id.starts_with(&format!("{}:", category.id)) {
                return Err(CoreError::Validation {
                    message: format!("pattern id {} not prefixed by category {}", p.id, category.id),
                });
            }
        }
    }

    Ok(())
}
