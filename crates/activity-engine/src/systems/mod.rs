pub mod effects;
pub mod placement;
pub mod render;
pub mod snap;
pub mod speech;
