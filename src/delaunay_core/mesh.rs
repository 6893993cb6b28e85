use hashbrown::HashSet;

use super::half_edge::HalfEdge;
use crate::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh stored as a half-edge structure.
///
/// A mesh owns three containers:
///  - the vertices. A vertex is identified by its index into [Mesh::vertices].
///  - the half-edges. Half-edges refer to vertices and to each other by index.
///  - the faces. Every live triangle is represented by exactly one of its half-edges.
///
/// Meshes are created by [Mesh::generate] and are read only afterwards. Half-edges of
/// removed faces stay in [Mesh::half_edges] but are not reachable from [Mesh::faces]
/// anymore.
///
/// # Example
/// ```
/// use delaunay_mesh::{Mesh, Point};
///
/// # fn main() -> Result<(), delaunay_mesh::TriangulationError> {
/// let mesh = Mesh::generate(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(5.0, 8.0),
/// ])?;
///
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// for [v0, v1, v2] in mesh.triangles() {
///     println!("Found triangle {} {} {}", v0, v1, v2);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Mesh {
    pub(super) vertices: Vec<Point>,
    pub(super) edges: Vec<HalfEdge>,
    pub(super) faces: HashSet<usize>,
}

impl Mesh {
    /// Creates a mesh without any vertices, edges or faces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all vertices in index order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns all half-edges, including those of removed faces.
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    /// Returns the representative half-edge index of every live face.
    ///
    /// The iteration order of the set is unspecified.
    pub fn faces(&self) -> &HashSet<usize> {
        &self.faces
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of live faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex at the given index.
    ///
    /// Panics if the index is out of bounds.
    pub fn vertex(&self, index: usize) -> Point {
        self.vertices[index]
    }

    /// Returns the half-edge at the given index.
    ///
    /// Panics if the index is out of bounds.
    pub fn half_edge(&self, index: usize) -> &HalfEdge {
        &self.edges[index]
    }

    /// Returns the three half-edges of a face, starting with `edge`.
    pub fn face_edges(&self, edge: usize) -> [usize; 3] {
        let e1 = self.edges[edge].next;
        let e2 = self.edges[e1].next;
        [edge, e1, e2]
    }

    /// Returns the vertex indices of a face in counter clockwise order, starting with the
    /// origin of `edge`.
    pub fn face_vertices(&self, edge: usize) -> [usize; 3] {
        self.face_edges(edge).map(|e| self.edges[e].vertex)
    }

    /// Returns the vertex positions of a face in counter clockwise order.
    pub fn face_positions(&self, edge: usize) -> [Point; 3] {
        self.face_vertices(edge).map(|v| self.vertices[v])
    }

    /// Iterates over the vertex index triples of every live face.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.faces.iter().map(move |face| self.face_vertices(*face))
    }

    /// Returns `true` if following `next` three times from `edge` returns to `edge`.
    pub(crate) fn is_triangle(&self, edge: usize) -> bool {
        let [_, _, e2] = self.face_edges(edge);
        self.edges[e2].next == edge
    }

    /// Returns `true` if the face containing `edge` has zero area.
    pub(crate) fn is_degenerate(&self, edge: usize) -> bool {
        let [a, b, c] = self.face_positions(edge);
        !super::math::is_ordered_ccw(a, b, c)
    }

    /// Checks the structural invariants of the mesh and the empty circumcircle property
    /// of every live edge. Panics on the first violation.
    #[cfg(test)]
    pub(crate) fn sanity_check(&self) {
        use super::math;

        for (index, edge) in self.edges.iter().enumerate() {
            if let Some(twin) = edge.twin {
                assert_eq!(self.edges[twin].twin, Some(index), "twin of {} is asymmetric", index);
            }
        }

        for &face in &self.faces {
            assert!(self.is_triangle(face), "face {} does not close", face);
            let vertices = self.face_vertices(face);
            for v in vertices {
                assert!(v < self.vertices.len(), "face {} refers to dead vertex {}", face, v);
            }
            let [a, b, c] = self.face_positions(face);
            assert!(math::is_ordered_ccw(a, b, c), "face {} is not ccw", face);

            for edge in self.face_edges(face) {
                let HalfEdge { vertex, next, twin } = self.edges[edge];
                let Some(twin) = twin else { continue };
                // Twins connect the same two vertices in opposite directions
                assert_eq!(self.edges[twin].vertex, self.edges[next].vertex);
                assert_eq!(self.edges[self.edges[twin].next].vertex, vertex);

                let opposite = self.edges[self.edges[self.edges[twin].next].next].vertex;
                assert!(
                    !math::contained_in_circumference(a, b, c, self.vertices[opposite]),
                    "edge {} is not locally Delaunay",
                    edge
                );
            }
        }
    }
}
