//! Nutrition Tracker Common Library
//!
//! CLIと表示層で共有される型と照合ロジック

pub mod types;
pub mod error;
pub mod normalize;
pub mod index;
pub mod resolver;
pub mod completion;

pub use types::{MenuEntry, Record, ShoppingItem, WorkbookData};
pub use error::{Error, Result};
pub use normalize::normalize_name;
pub use index::DishRecipeIndex;
pub use resolver::{MatchKind, RecipeResolver, Resolution};
pub use completion::CompletionState;
