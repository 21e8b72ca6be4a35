mod point;

pub use point::{is_inline, round_to, Point};
