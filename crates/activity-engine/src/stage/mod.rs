pub mod catalog;
pub mod descriptor;
pub mod kind;
pub mod number;

pub use catalog::{write_script, Catalog, CatalogError};
pub use descriptor::{FeedbackSprites, Sentence, SourceItem, StageDescriptor, TargetSpec, TokenSpec};
pub use kind::{InputMode, StageError, StageKind, WritingVariant};
