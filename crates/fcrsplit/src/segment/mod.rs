pub mod map;
pub mod range;
pub mod segmenter;

pub use map::RangeMap;
pub use range::PageRange;
pub use segmenter::{segment, RangeSegmenter};
