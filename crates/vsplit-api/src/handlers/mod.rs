//! Request handlers.

pub mod health;
pub mod segment;

pub use health::health;
pub use segment::segment_video;
