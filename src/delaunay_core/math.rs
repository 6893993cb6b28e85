use crate::{CoordinateError, Point};

/// The smallest allowed coordinate value greater than zero that can be triangulated.
/// This value is equal to 2<sup>-142</sup>.
///
/// The *absolute value* of any input coordinate must be either zero or greater than or
/// equal to this value. Smaller magnitudes underflow the exact in-circle predicate.
///
/// *See also [validate_coordinate], [MAX_ALLOWED_VALUE], [mitigate_underflow]*
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed coordinate value that can be triangulated.
/// This value is equal to 2<sup>201</sup>.
///
/// *See also [validate_coordinate], [MIN_ALLOWED_VALUE]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Default margin added to the enclosing circle of the bounding triangle.
pub const DEFAULT_BOUNDING_MARGIN: f64 = 0.5;

const SIN_45: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Lower bound of the bounding margin relative to the enclosing radius. Keeps the margin
/// representable for large coordinates.
const MIN_RELATIVE_MARGIN: f64 = 1.0e-10;

/// Checks if a coordinate value is suitable for triangulation.
///
/// Will return an error if and only if
///  - The absolute value of the coordinate is too small (See [MIN_ALLOWED_VALUE])
///  - The absolute value of the coordinate is too large (See [MAX_ALLOWED_VALUE])
///  - The coordinate is NaN (not a number)
///
/// Passing in any non-finite number will result in `Err(CoordinateError::TooLarge)`.
pub fn validate_coordinate(value: f64) -> Result<(), CoordinateError> {
    if value.is_nan() {
        Err(CoordinateError::NAN)
    } else if value.abs() < MIN_ALLOWED_VALUE && value != 0.0 {
        Err(CoordinateError::TooSmall)
    } else if value.abs() > MAX_ALLOWED_VALUE {
        Err(CoordinateError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if a point is suitable for triangulation.
///
/// Both planar coordinates must be valid (see [validate_coordinate]) and `z` must be zero.
pub fn validate_point(point: &Point) -> Result<(), CoordinateError> {
    validate_coordinate(point.x)?;
    validate_coordinate(point.y)?;
    if !point.is_planar() {
        return Err(CoordinateError::NonPlanar);
    }
    Ok(())
}

/// Prevents underflow issues of a position by setting any coordinate that is too small to zero.
///
/// Note that this method will _always_ round towards zero. Useful to clean up input before
/// passing it to [Mesh::generate](crate::Mesh::generate), which rejects such coordinates.
///
/// # Example
/// ```
/// use delaunay_mesh::{mitigate_underflow, validate_point, CoordinateError, Point};
///
/// let invalid_position = Point::new(1.0e-44, 42.0);
/// assert_eq!(validate_point(&invalid_position), Err(CoordinateError::TooSmall));
///
/// let valid_position = mitigate_underflow(invalid_position);
/// assert_eq!(valid_position, Point::new(0.0, 42.0));
/// assert!(validate_point(&valid_position).is_ok());
/// ```
pub fn mitigate_underflow(position: Point) -> Point {
    Point::new_3d(
        mitigate_underflow_for_coordinate(position.x),
        mitigate_underflow_for_coordinate(position.y),
        position.z,
    )
}

fn mitigate_underflow_for_coordinate(coordinate: f64) -> f64 {
    if coordinate != 0.0 && coordinate.abs() < MIN_ALLOWED_VALUE {
        0.0
    } else {
        coordinate
    }
}

fn to_robust_coord(point: Point) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Twice the signed area of the triangle `(a, b, c)`. Positive for ccw triangles.
#[inline]
pub(crate) fn barycentric_det(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Converts `v` into barycentric coordinates relative to the triangle `(a, b, c)`.
///
/// A helper for callers that want to interpolate over a face of a [Mesh](crate::Mesh).
/// Triangulation itself decides containment with exact signs instead.
///
/// The coordinates are returned in vertex order: the weights of `a`, `b` and `c`.
/// Returns `None` if the triangle has zero area. Exact predicates decide degeneracy, the
/// weights themselves are ordinary floating point ratios.
pub fn to_barycentric(v: Point, a: Point, b: Point, c: Point) -> Option<[f64; 3]> {
    let exact_area = robust::orient2d(to_robust_coord(a), to_robust_coord(b), to_robust_coord(c));
    if exact_area == 0.0 {
        return None;
    }
    let area = barycentric_det(a, b, c);
    let weight_a = barycentric_det(v, b, c) / area;
    let weight_c = barycentric_det(a, b, v) / area;
    Some([weight_a, 1.0 - weight_a - weight_c, weight_c])
}

/// Returns `true` if all barycentric coordinates lie in the closed range `[0, 1]`.
///
/// Meant for weights returned by [to_barycentric].
#[inline]
pub fn is_inside_triangle(barycentric: [f64; 3]) -> bool {
    barycentric
        .iter()
        .all(|weight| (0.0..=1.0).contains(weight))
}

/// Returns whether `v` lies inside or on the boundary of the triangle `(a, b, c)`, or `None`
/// if the triangle has zero area.
///
/// Equivalent to checking that all barycentric coordinates of `v` are within `[0, 1]`, but
/// the signs of the three sub-areas are evaluated exactly. Neighbouring faces therefore
/// never both reject a point that lies on their shared edge.
pub(crate) fn triangle_contains(v: Point, a: Point, b: Point, c: Point) -> Option<bool> {
    let [a, b, c, v] = [a, b, c, v].map(to_robust_coord);
    let area = robust::orient2d(a, b, c);
    if area == 0.0 {
        return None;
    }
    let sub_areas = [
        robust::orient2d(v, b, c),
        robust::orient2d(a, v, c),
        robust::orient2d(a, b, v),
    ];
    Some(sub_areas.iter().all(|sub| *sub * area.signum() >= 0.0))
}

/// Returns `true` if `p` lies strictly inside the circumcircle of the ccw triangle
/// `(v1, v2, v3)`.
///
/// This is the sign of the lifted 3x3 determinant
///
/// ```text
/// | v1.x - p.x   v1.y - p.y   |v1|² - |p|² |
/// | v2.x - p.x   v2.y - p.y   |v2|² - |p|² |
/// | v3.x - p.x   v3.y - p.y   |v3|² - |p|² |
/// ```
///
/// evaluated with adaptive exact arithmetic. Points exactly on the circle are not
/// contained.
pub fn contained_in_circumference(v1: Point, v2: Point, v3: Point, p: Point) -> bool {
    robust::incircle(
        to_robust_coord(v1),
        to_robust_coord(v2),
        to_robust_coord(v3),
        to_robust_coord(p),
    ) > 0.0
}

/// Returns `true` if the triangle `(p1, p2, p3)` is ordered counter clockwise.
pub fn is_ordered_ccw(p1: Point, p2: Point, p3: Point) -> bool {
    robust::orient2d(to_robust_coord(p1), to_robust_coord(p2), to_robust_coord(p3)) > 0.0
}

/// Returns three ccw ordered points forming a triangle that strictly contains all given
/// points. Returns `None` if `vertices` is empty.
///
/// The points are enclosed by a circle around their bounding box center whose radius is
/// the largest center distance plus `margin`. For large point sets the margin grows to at
/// least `1e-10` times that distance, so the circle stays strictly larger than the points'
/// extent. The triangle's two upper sides touch that
/// circle at 45 degrees from the apex, which sits on the vertical axis through the center.
/// Its base touches the bottom of the circle. The result is
/// `[bottom right, apex, bottom left]`.
pub fn bounding_triangle(vertices: &[Point], margin: f64) -> Option<[Point; 3]> {
    let first = vertices.first()?;
    let (mut left, mut right, mut bottom, mut top) = (first.x, first.x, first.y, first.y);
    for v in vertices {
        left = left.min(v.x);
        right = right.max(v.x);
        bottom = bottom.min(v.y);
        top = top.max(v.y);
    }
    let center = Point::new(left + (right - left) / 2.0, bottom + (top - bottom) / 2.0);

    let radius = vertices
        .iter()
        .map(|v| center.distance_2d(*v))
        .fold(0.0, f64::max);
    let enclosing = radius + margin.max(radius * MIN_RELATIVE_MARGIN);

    // Tangent lines at +-45 degrees meet the vertical axis at sqrt(2) * enclosing.
    let apex = Point::new(center.x, center.y + enclosing / SIN_45);

    // Direction from the apex down the right hand side.
    let tangent_point = center + Point::new(enclosing * SIN_45, enclosing * SIN_45);
    let dir = (tangent_point - apex).normalize();

    // Similar triangles: walk along `dir` until the base line at center.y - enclosing.
    let scale = -(apex.y - (center.y - enclosing)) / dir.y;
    let dx = dir.x * scale;

    let bottom_right = Point::new(center.x + dx, center.y - enclosing);
    let bottom_left = Point::new(center.x - dx, bottom_right.y);

    Some([bottom_right, apex, bottom_left])
}
