//! Timeline Projector: lazy monthly benefit series with markers

mod engine;
mod point;

pub use engine::{TimelineIter, TimelineProjector, TimelineTheme};
pub use point::{Marker, TimelinePoint, TimelineResult};
