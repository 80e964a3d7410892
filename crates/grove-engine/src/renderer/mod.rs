pub mod geometry;
pub mod instance;
pub mod pose;

// Re-export key types for convenient access
pub use geometry::{Color, Figure, FigureKind, Paint, Part, PartName, Primitive, Shape};
pub use instance::{RenderBuffer, ShapeInstance};
pub use pose::{PoseBackend, PoseGraph, PoseNode};
