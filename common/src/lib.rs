//! Breakfast AI Common Library
//!
//! 食品カタログと甘い/しょっぱい分類器。CLIなどの呼び出し側から共有される。

pub mod types;
pub mod catalog;
pub mod classifier;
pub mod distance;
pub mod error;

pub use types::{ClassificationResult, FoodEntry, Label, MatchKind, ResultLabel};
pub use catalog::{Catalog, CatalogData, CatalogItem};
pub use classifier::{normalize_query, validate_query, Classifier, ClassifierConfig};
pub use distance::{levenshtein_distance, similarity};
pub use error::{Error, Result};
