//! Cross-crate trait seams.

pub mod clock;

pub use clock::{Clock, SystemClock};
