//! Location references and their resolution to document keys.

pub mod reference;
pub mod resolver;

pub use reference::{LocationError, LocationReference, PointRef, TabSpec, RANGE_SEPARATOR};
pub use resolver::{resolve, ResolveMode, Resolver, DEFAULT_RADIUS};
