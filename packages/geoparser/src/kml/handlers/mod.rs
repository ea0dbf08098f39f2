//! Tag handlers for KML documents, grouped by element family.

mod container;
mod coordinates;
mod data;
mod feature;
mod geometry;
mod overlay;
mod region;
mod style;
mod time;
mod view;

pub use container::*;
pub use coordinates::*;
pub use data::*;
pub use feature::*;
pub use geometry::*;
pub use overlay::*;
pub use region::*;
pub use style::*;
pub use time::*;
pub use view::*;
