use std::{error::Error, fmt::Display};

/// Describes why an input coordinate was rejected.
///
/// *See [crate::validate_coordinate] and [crate::validate_point]*
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum CoordinateError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any coordinate must either be zero or greater than or equal
    /// to [crate::MIN_ALLOWED_VALUE].
    TooSmall,

    /// A coordinate value was too large or not finite.
    ///
    /// The absolute value of any coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    TooLarge,

    /// A coordinate value was NaN.
    NAN,

    /// The point's z coordinate was not zero.
    NonPlanar,
}

impl Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for CoordinateError {}

/// The error type returned when a triangulation cannot be generated.
///
/// Apart from [TriangulationError::InvalidCoordinate], every variant signals that the mesh
/// under construction reached a state from which no valid triangulation can be produced.
/// None of them is recoverable within the same generation call.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum TriangulationError {
    /// An input point cannot be triangulated. Checked before any mesh is built.
    InvalidCoordinate {
        /// Index of the offending point in the input sequence.
        vertex: usize,
        /// Why the point was rejected.
        reason: CoordinateError,
    },

    /// A face with zero area was encountered while computing barycentric coordinates.
    ///
    /// Duplicate or collinear input points can cause this.
    DegenerateTriangle {
        /// Representative half-edge of the degenerate face.
        face: usize,
    },

    /// No live face contains the vertex that is being inserted.
    PointLocationFailed {
        /// The vertex that could not be located.
        vertex: usize,
    },

    /// A half-edge cycle contains no registered face representative.
    FaceLookupFailed {
        /// The half-edge the lookup started from.
        edge: usize,
    },

    /// A face cycle does not close after exactly three `next` steps.
    NotATriangle {
        /// Representative half-edge of the malformed face.
        face: usize,
    },

    /// Edge legalization exceeded its flip budget.
    LegalizationDiverged {
        /// The edge the legalization started from.
        edge: usize,
        /// Number of flips performed before giving up.
        flips: usize,
    },
}

impl Display for TriangulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriangulationError::InvalidCoordinate { vertex, reason } => {
                write!(f, "input point {} has an invalid coordinate: {}", vertex, reason)
            }
            TriangulationError::DegenerateTriangle { face } => {
                write!(f, "face {} has zero area", face)
            }
            TriangulationError::PointLocationFailed { vertex } => {
                write!(f, "no face contains vertex {}", vertex)
            }
            TriangulationError::FaceLookupFailed { edge } => {
                write!(f, "half-edge {} does not belong to a registered face", edge)
            }
            TriangulationError::NotATriangle { face } => {
                write!(f, "face {} is not a triangle", face)
            }
            TriangulationError::LegalizationDiverged { edge, flips } => write!(
                f,
                "legalization of half-edge {} did not terminate after {} flips",
                edge, flips
            ),
        }
    }
}

impl Error for TriangulationError {}
