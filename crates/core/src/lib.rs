pub mod catalog;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pattern;
pub mod render;
pub mod rules;
pub mod taxonomy;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use models::*;
pub use normalize::normalize_name;
pub use pattern::{split_skin, SkinSplit};
pub use render::{render_module, CATEGORY_LABELS, CONDITIONS};
pub use rules::{classify_record, classify_view, matching_rule, RecordView, Rule, RULES};
pub use taxonomy::{build_taxonomy, Taxonomy};
