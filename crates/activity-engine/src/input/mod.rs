pub mod queue;
pub mod strokes;
