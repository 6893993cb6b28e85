mod generation;
mod half_edge;
mod mesh;
pub(crate) mod mesh_operations;

pub(crate) mod math;

pub use generation::GenerateOptions;
pub use half_edge::HalfEdge;
pub use mesh::Mesh;
