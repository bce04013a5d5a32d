//! Shared types for the Ember-GS digital twin component crates.
//!
//! Everything that crosses a component boundary lives here: the canonical
//! texel, color vectors, vertex/triangle/fragment payloads, the tiled
//! surface address math, and the memory-port request/event vocabulary.

pub mod color;
pub mod mem;
pub mod texel;
pub mod tiled;
pub mod vertex;

pub use color::{Argb8, Rgba12};
pub use texel::Texel;
pub use vertex::{Fragment, Triangle, Vertex};
