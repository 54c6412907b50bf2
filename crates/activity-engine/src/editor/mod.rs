pub mod cheat;

pub use cheat::{CheatEditor, CheatField, CheatRow, CheatStatus, SaveStatus};
