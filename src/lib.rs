//! # Delaunay mesh
//!
//! Computes the Delaunay triangulation of a set of 2D points and stores it as a half-edge mesh.
//!
//! Triangulations are built by randomized incremental insertion: the points are shuffled,
//! enclosed in a large bounding triangle and inserted one by one. Every insertion splits
//! the containing triangle into three and flips edges until every triangle has an empty
//! circumcircle again. Finally, all triangles touching the bounding triangle are removed.
//!
//! # Features
//!  - Exact orientation and in-circle predicates, see the [robust](https://docs.rs/robust)
//!    crate
//!  - Read only access to vertices, half-edges and faces of the finished [Mesh]
//!  - Reproducible construction with [GenerateOptions::with_seed]
//!  - A minimal drawing interface, see [Renderer]
//!  - Serde support with the `serde` feature
//!
//! # Example
//! ```
//! use delaunay_mesh::{Mesh, Point};
//!
//! # fn main() -> Result<(), delaunay_mesh::TriangulationError> {
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//! let mesh = Mesh::generate(points)?;
//! assert_eq!(mesh.num_faces(), 2);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_docs)]

mod delaunay_core;
mod error;
mod point;
mod render;

#[cfg(test)]
mod test_utilities;

pub use crate::delaunay_core::math::{
    bounding_triangle, contained_in_circumference, is_inside_triangle, is_ordered_ccw,
    mitigate_underflow, to_barycentric, validate_coordinate, validate_point,
    DEFAULT_BOUNDING_MARGIN, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE,
};

pub use crate::delaunay_core::{GenerateOptions, HalfEdge, Mesh};
pub use crate::error::{CoordinateError, TriangulationError};
pub use crate::point::Point;
pub use crate::render::{draw, Entity, Renderer};
