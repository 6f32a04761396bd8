//! Data models for keyboard layouts, layers, geometries and dead keys.
//!
//! Models are independent of the source format and of the export targets.

pub mod casing;
pub mod dead_key;
pub mod geometry;
pub mod key;
pub mod layer;
pub mod layout;

// Re-export all model types
pub use casing::{lower_key, upper_key, BLANK};
pub use dead_key::{ComposeBehavior, DeadKey};
pub use geometry::{Geometry, GeometryRow, KEY_STRIDE};
pub use key::{KeyId, KeySection, KEY_SECTIONS};
pub use layer::{Layer, LayerPair, Level};
pub use layout::{Layout, LayoutMetadata};
