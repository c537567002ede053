//! Hull geometry: triangle soups, tetrahedron integration and plane clipping.

pub mod clip;
pub mod plane;
pub mod soup;
pub mod volume;

pub use clip::*;
pub use plane::*;
pub use soup::*;
pub use volume::*;
