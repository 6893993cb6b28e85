#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A directed edge of a face.
///
/// A half-edge stores three indices that act as pointers into a [Mesh](crate::Mesh):
/// the vertex it starts at, the following half-edge counter clockwise around the same face
/// and its twin: the oppositely oriented half-edge of the adjacent face.
///
/// Following `next` three times always returns to the start for half-edges of a live face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct HalfEdge {
    /// Index of this edge's origin in [Mesh::vertices](crate::Mesh::vertices).
    pub vertex: usize,
    /// Index of the next half-edge of the same face.
    pub next: usize,
    /// Index of the twin half-edge.
    ///
    /// `None` if this edge borders the unbounded exterior, either because no adjacent face
    /// was ever created or because the adjacent face has been removed.
    pub twin: Option<usize>,
}

impl HalfEdge {
    pub(crate) fn new(vertex: usize, next: usize, twin: Option<usize>) -> Self {
        HalfEdge { vertex, next, twin }
    }

    /// Returns `true` if this edge borders the unbounded exterior.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::HalfEdge;

    #[test]
    fn test_boundary() {
        assert!(HalfEdge::default().is_boundary());
        assert!(HalfEdge::new(0, 1, None).is_boundary());
        assert!(!HalfEdge::new(0, 1, Some(4)).is_boundary());
    }
}
