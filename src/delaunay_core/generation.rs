use hashbrown::HashSet;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smallvec::SmallVec;

use super::half_edge::HalfEdge;
use super::math;
use super::mesh::Mesh;
use super::mesh_operations;
use crate::{Point, TriangulationError};

/// Controls how [Mesh::generate_with_options] builds a triangulation.
///
/// The defaults match [Mesh::generate]: the input is shuffled with a randomly seeded
/// generator, the bounding triangle margin is [math::DEFAULT_BOUNDING_MARGIN] and every
/// legalization may flip up to four times as many edges as the mesh contains.
///
/// # Example
/// ```
/// use delaunay_mesh::{GenerateOptions, Mesh, Point};
///
/// # fn main() -> Result<(), delaunay_mesh::TriangulationError> {
/// let options = GenerateOptions::new().with_seed(42).with_bounding_margin(2.0);
/// let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
/// let mesh = Mesh::generate_with_options(points, &options)?;
/// assert_eq!(mesh.num_faces(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    seed: Option<u64>,
    shuffle: bool,
    bounding_margin: f64,
    flip_limit_factor: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            shuffle: true,
            bounding_margin: math::DEFAULT_BOUNDING_MARGIN,
            flip_limit_factor: 4,
        }
    }
}

impl GenerateOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the random permutation of the input points, making the generated mesh
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Inserts the points in the order they were given instead of shuffling them.
    ///
    /// The resulting triangle set is the same for points in general position, but
    /// construction may take considerably longer for sorted input.
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Sets the margin by which the bounding triangle's inner circle exceeds the
    /// points' enclosing circle.
    ///
    /// # Panics
    /// Panics if `margin` is not a positive finite number.
    pub fn with_bounding_margin(mut self, margin: f64) -> Self {
        assert!(
            margin.is_finite() && margin > 0.0,
            "Bounding margin must be positive and finite"
        );
        self.bounding_margin = margin;
        self
    }

    /// Sets how many flips a single legalization may perform, relative to the current
    /// number of half-edges. Exceeding the limit aborts generation with
    /// [TriangulationError::LegalizationDiverged].
    pub fn with_flip_limit_factor(mut self, factor: usize) -> Self {
        self.flip_limit_factor = factor;
        self
    }

    /// Returns the configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the bounding triangle margin.
    pub fn bounding_margin(&self) -> f64 {
        self.bounding_margin
    }

    fn shuffle(&self, points: &mut [Point]) {
        if !self.shuffle {
            return;
        }
        match self.seed {
            Some(seed) => points.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => points.shuffle(&mut rand::thread_rng()),
        }
    }
}

impl Mesh {
    /// Computes the Delaunay triangulation of a point set.
    ///
    /// The order of `points` does not matter: they are shuffled before insertion and
    /// [Mesh::vertices] reflects the shuffled order. An empty input yields an empty mesh.
    /// One or two points, or only collinear points, yield a mesh without faces.
    ///
    /// Duplicate points are not merged. Inserting a point at the position of an existing
    /// vertex fails with [TriangulationError::DegenerateTriangle]. Callers should
    /// deduplicate their input.
    ///
    /// *See also [Mesh::generate_with_options]*
    pub fn generate(points: Vec<Point>) -> Result<Mesh, TriangulationError> {
        Self::generate_with_options(points, &GenerateOptions::default())
    }

    /// Computes the Delaunay triangulation of a point set with custom options.
    pub fn generate_with_options(
        mut points: Vec<Point>,
        options: &GenerateOptions,
    ) -> Result<Mesh, TriangulationError> {
        for (vertex, point) in points.iter().enumerate() {
            math::validate_point(point)
                .map_err(|reason| TriangulationError::InvalidCoordinate { vertex, reason })?;
        }

        let Some(bounding) = math::bounding_triangle(&points, options.bounding_margin) else {
            return Ok(Mesh::new());
        };

        let num_points = points.len();
        debug!("Generating triangulation of {} points", num_points);
        options.shuffle(&mut points);

        let mut result = Mesh {
            vertices: points,
            edges: Vec::with_capacity(3 + 6 * num_points),
            faces: HashSet::with_capacity(1 + 2 * num_points),
        };
        result.vertices.extend(bounding);
        mesh_operations::create_seed_face(
            &mut result,
            [num_points, num_points + 1, num_points + 2],
        );

        let mut flips = 0;
        for vertex in 0..num_points {
            let face = result.locate(vertex)?;
            flips += result.insert_into_face(face, vertex, options.flip_limit_factor)?;
        }

        result.remove_bounding_triangle(num_points)?;
        debug!(
            "Generated {} faces from {} points using {} flips",
            result.num_faces(),
            num_points,
            flips
        );
        Ok(result)
    }

    /// Returns the representative of a face containing the given vertex.
    ///
    /// Scans all faces. Points on a shared edge resolve to whichever face is visited first.
    pub(crate) fn locate(&self, vertex: usize) -> Result<usize, TriangulationError> {
        let position = self.vertices[vertex];
        for &face in &self.faces {
            let [a, b, c] = self.face_positions(face);
            let contained = math::triangle_contains(position, a, b, c)
                .ok_or(TriangulationError::DegenerateTriangle { face })?;
            if contained {
                if [a, b, c].contains(&position) {
                    // A coincident vertex would split off a zero area face.
                    return Err(TriangulationError::DegenerateTriangle { face });
                }
                return Ok(face);
            }
        }
        Err(TriangulationError::PointLocationFailed { vertex })
    }

    /// Splits `face` at `vertex` and restores the Delaunay property around the new vertex.
    ///
    /// Returns the number of flips.
    fn insert_into_face(
        &mut self,
        face: usize,
        vertex: usize,
        flip_limit_factor: usize,
    ) -> Result<usize, TriangulationError> {
        trace!("Inserting vertex {} into face {}", vertex, face);
        let mut outer_edges = mesh_operations::split_face(self, face, vertex)?;
        // A vertex on an existing edge leaves a zero area face behind. Flipping that edge
        // first removes the face before any other flip can involve it.
        outer_edges.sort_by_key(|edge| !self.is_degenerate(*edge));
        let mut flips = 0;
        for edge in outer_edges {
            let flip_limit = flip_limit_factor.saturating_mul(self.edges.len());
            flips += self.legalize_edge(edge, flip_limit)?;
        }
        Ok(flips)
    }

    /// The Delaunay property refers to the property that no point lies inside
    /// the circumcircle of any of the triangulation's triangles. Inserting a
    /// new point may violate this property, this method "repairs" it by flipping
    /// edges until the property holds again. Every flip may produce more "illegal"
    /// edges: the four outer edges of the flipped quad are checked next.
    ///
    /// Edges without twin border the exterior and are never flipped.
    ///
    /// Returns the number of flips.
    fn legalize_edge(
        &mut self,
        edge: usize,
        flip_limit: usize,
    ) -> Result<usize, TriangulationError> {
        let mut edges: SmallVec<[usize; 8]> = Default::default();
        edges.push(edge);

        let mut flips = 0;
        while let Some(e) = edges.pop() {
            let HalfEdge { twin, .. } = self.edges[e];
            let Some(twin) = twin else {
                continue;
            };

            let [a, b, c] = self.face_positions(e);
            let opposite = self.edges[self.edges[self.edges[twin].next].next].vertex;
            if !math::contained_in_circumference(a, b, c, self.vertices[opposite]) {
                continue;
            }

            if flips >= flip_limit {
                return Err(TriangulationError::LegalizationDiverged { edge, flips });
            }
            trace!("Flipping edge {}", e);
            let quad = mesh_operations::flip_edge(self, e)?;
            flips += 1;
            edges.extend(quad);
        }
        Ok(flips)
    }

    /// Removes every face touching one of the three bounding vertices, which occupy the
    /// indices `first_bounding_vertex..`, and drops those vertices.
    fn remove_bounding_triangle(
        &mut self,
        first_bounding_vertex: usize,
    ) -> Result<(), TriangulationError> {
        let mut to_delete = HashSet::new();
        for (index, edge) in self.edges.iter().enumerate() {
            if edge.vertex >= first_bounding_vertex {
                to_delete.insert(mesh_operations::find_face(self, index)?);
            }
        }
        for face in to_delete {
            mesh_operations::remove_face(self, face);
        }
        self.vertices.truncate(first_bounding_vertex);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use hashbrown::HashSet;

    use super::GenerateOptions;
    use crate::test_utilities::{random_points_in_window, random_points_with_seed, SEED, SEED2};
    use crate::{CoordinateError, Mesh, Point, TriangulationError};

    fn seeded(seed: u64) -> GenerateOptions {
        GenerateOptions::new().with_seed(seed)
    }

    /// Every face as a sorted triple of point positions, so that meshes built from
    /// different permutations can be compared.
    fn triangle_set(mesh: &Mesh) -> HashSet<[[u64; 2]; 3]> {
        mesh.faces()
            .iter()
            .map(|face| {
                let mut corners =
                    mesh.face_positions(*face).map(|p| [p.x.to_bits(), p.y.to_bits()]);
                corners.sort();
                corners
            })
            .collect()
    }

    #[test]
    fn test_empty() -> Result<(), TriangulationError> {
        let mesh = Mesh::generate(Vec::new())?;
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.half_edges().is_empty());
        Ok(())
    }

    #[test]
    fn test_single_point() -> Result<(), TriangulationError> {
        let mesh = Mesh::generate(vec![Point::new(1.0, 2.0)])?;
        assert_eq!(mesh.vertices(), &[Point::new(1.0, 2.0)]);
        assert_eq!(mesh.num_faces(), 0);
        mesh.sanity_check();
        Ok(())
    }

    #[test]
    fn test_two_points() -> Result<(), TriangulationError> {
        let mesh = Mesh::generate(vec![Point::new(0.0, 0.0), Point::new(3.0, 1.0)])?;
        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(mesh.num_faces(), 0);
        mesh.sanity_check();
        Ok(())
    }

    #[test]
    fn test_three_points() -> Result<(), TriangulationError> {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ];
        let mesh = Mesh::generate(points.clone())?;
        mesh.sanity_check();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);

        let face = *mesh.faces().iter().next().unwrap();
        let positions = mesh.face_positions(face);
        for p in &points {
            assert!(positions.contains(p));
        }
        for edge in mesh.face_edges(face) {
            assert_eq!(mesh.half_edge(edge).twin, None);
        }
        Ok(())
    }

    #[test]
    fn test_square() -> Result<(), TriangulationError> {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        for seed in 0..10 {
            let mesh = Mesh::generate_with_options(points.clone(), &seeded(seed))?;
            mesh.sanity_check();
            assert_eq!(mesh.num_vertices(), 4);
            assert_eq!(mesh.num_faces(), 2);

            // Both triangles together cover the square exactly once
            let area: f64 = mesh
                .faces()
                .iter()
                .map(|face| {
                    let [a, b, c] = mesh.face_positions(*face);
                    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) * 0.5
                })
                .sum();
            assert_eq!(area, 100.0);

            // The two faces share exactly one (diagonal) edge
            let shared = mesh
                .faces()
                .iter()
                .flat_map(|face| mesh.face_edges(*face))
                .filter(|edge| mesh.half_edge(*edge).twin.is_some())
                .count();
            assert_eq!(shared, 2);
        }
        Ok(())
    }

    #[test]
    fn test_diagonal_follows_circumcircle() -> Result<(), TriangulationError> {
        // Only the short diagonal (1, 3) keeps both circumcircles empty
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, -1.0),
            Point::new(8.0, 0.0),
            Point::new(4.0, 1.0),
        ];
        for seed in 0..10 {
            let mesh = Mesh::generate_with_options(points.clone(), &seeded(seed))?;
            mesh.sanity_check();
            assert_eq!(mesh.num_faces(), 2);
            for [a, b, c] in mesh.triangles() {
                let xs: Vec<_> = [a, b, c].iter().map(|v| mesh.vertex(*v).x).collect();
                assert_eq!(xs.iter().filter(|x| **x == 4.0).count(), 2);
            }
        }
        Ok(())
    }

    #[test]
    fn test_collinear_points() -> Result<(), TriangulationError> {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let mesh = Mesh::generate_with_options(points, &seeded(7))?;
        mesh.sanity_check();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 0);
        Ok(())
    }

    #[test]
    fn test_point_on_edge() -> Result<(), TriangulationError> {
        // The last point lies on the segment between the first two
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, -3.0),
            Point::new(2.0, 0.0),
        ];
        let mesh = Mesh::generate_with_options(points, &GenerateOptions::new().without_shuffle())?;
        mesh.sanity_check();
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_faces(), 4);
        for [a, b, c] in mesh.triangles() {
            assert!([a, b, c].contains(&4));
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_point_fails() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
            Point::new(4.0, 0.0),
        ];
        let result = Mesh::generate_with_options(points, &GenerateOptions::new().without_shuffle());
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateTriangle { .. })
        ));
    }

    #[test]
    fn test_invalid_coordinates() {
        let result = Mesh::generate(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]);
        assert_eq!(
            result.unwrap_err(),
            TriangulationError::InvalidCoordinate {
                vertex: 1,
                reason: CoordinateError::NAN
            }
        );

        let result = Mesh::generate(vec![Point::new_3d(0.0, 0.0, 1.0)]);
        assert_eq!(
            result.unwrap_err(),
            TriangulationError::InvalidCoordinate {
                vertex: 0,
                reason: CoordinateError::NonPlanar
            }
        );

        let result = Mesh::generate(vec![Point::new(f64::INFINITY, 0.0)]);
        assert!(matches!(
            result,
            Err(TriangulationError::InvalidCoordinate {
                reason: CoordinateError::TooLarge,
                ..
            })
        ));
    }

    #[test]
    fn test_vertex_count_and_permutation() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(200, SEED);
        let mesh = Mesh::generate_with_options(points.clone(), &seeded(3))?;
        assert_eq!(mesh.num_vertices(), points.len());

        let mut expected: Vec<_> = points.iter().map(|p| [p.x.to_bits(), p.y.to_bits()]).collect();
        let mut actual: Vec<_> = mesh
            .vertices()
            .iter()
            .map(|p| [p.x.to_bits(), p.y.to_bits()])
            .collect();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
        Ok(())
    }

    #[test]
    fn test_seed_is_reproducible() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(100, SEED2);
        let first = Mesh::generate_with_options(points.clone(), &seeded(11))?;
        let second = Mesh::generate_with_options(points, &seeded(11))?;
        assert_eq!(first.vertices(), second.vertices());
        assert_eq!(first.half_edges(), second.half_edges());
        assert_eq!(first.faces(), second.faces());
        Ok(())
    }

    #[test]
    fn test_without_shuffle_keeps_order() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(50, SEED);
        let mesh =
            Mesh::generate_with_options(points.clone(), &GenerateOptions::new().without_shuffle())?;
        assert_eq!(mesh.vertices(), &points[..]);
        mesh.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_many_points() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(1000, SEED);
        let mesh = Mesh::generate(points)?;
        mesh.sanity_check();
        assert_eq!(mesh.num_vertices(), 1000);
        assert!(mesh.num_faces() > 0);
        Ok(())
    }

    #[test]
    fn test_window_points() -> Result<(), TriangulationError> {
        let points = random_points_in_window(800.0, 600.0, 500, SEED2);
        let mesh = Mesh::generate_with_options(points, &seeded(5))?;
        mesh.sanity_check();
        Ok(())
    }

    #[test]
    fn test_global_delaunay_property() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(150, SEED2);
        let mesh = Mesh::generate_with_options(points, &seeded(1))?;
        for &face in mesh.faces() {
            let [a, b, c] = mesh.face_vertices(face);
            let [pa, pb, pc] = mesh.face_positions(face);
            for (index, v) in mesh.vertices().iter().enumerate() {
                if index == a || index == b || index == c {
                    continue;
                }
                assert!(!crate::contained_in_circumference(pa, pb, pc, *v));
            }
        }
        Ok(())
    }

    #[test]
    fn test_independent_of_permutation() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(300, SEED);
        let reference = triangle_set(&Mesh::generate_with_options(
            points.clone(),
            &GenerateOptions::new().without_shuffle(),
        )?);
        assert!(!reference.is_empty());
        for seed in [1, 2, 3] {
            let mesh = Mesh::generate_with_options(points.clone(), &seeded(seed))?;
            assert_eq!(triangle_set(&mesh), reference);
        }
        Ok(())
    }

    #[test]
    fn test_flip_limit() {
        // A zero flip budget fails as soon as any edge needs flipping
        let points = random_points_with_seed(50, SEED);
        let options = seeded(9).with_flip_limit_factor(0);
        let result = Mesh::generate_with_options(points, &options);
        assert!(matches!(
            result,
            Err(TriangulationError::LegalizationDiverged { flips: 0, .. })
        ));
    }

    #[test]
    fn test_unlimited_flips() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(20, SEED);
        let options = seeded(9).with_flip_limit_factor(usize::MAX);
        let mesh = Mesh::generate_with_options(points, &options)?;
        mesh.sanity_check();
        Ok(())
    }

    #[test]
    fn test_large_coordinates() -> Result<(), TriangulationError> {
        let mut points = vec![Point::new(0.0, -1.0e17), Point::new(0.0, 1.0e17)];
        for i in 1..=10 {
            let x = i as f64 * 4.0e15;
            let y = (i as f64 - 5.5) * 1.5e16;
            points.push(Point::new(x, y));
            points.push(Point::new(-x, y));
        }

        let mesh =
            Mesh::generate_with_options(points.clone(), &GenerateOptions::new().without_shuffle())?;
        mesh.sanity_check();
        assert_eq!(mesh.num_vertices(), 22);
        assert!(mesh.num_faces() > 0);

        for seed in 0..50 {
            let mesh = Mesh::generate_with_options(points.clone(), &seeded(seed))?;
            mesh.sanity_check();
        }
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_negative_margin_panics() {
        let _ = GenerateOptions::new().with_bounding_margin(-1.0);
    }

    #[test]
    fn test_locate() -> Result<(), TriangulationError> {
        let points = random_points_with_seed(100, SEED2);
        let mut mesh = Mesh::generate_with_options(points, &seeded(4))?;
        let faces: Vec<_> = mesh.faces().iter().copied().collect();
        for face in faces {
            let [a, b, c] = mesh.face_positions(face);
            mesh.vertices.push((a + b + c) * (1.0 / 3.0));
            let centroid = mesh.num_vertices() - 1;
            assert_eq!(mesh.locate(centroid), Ok(face));
        }

        mesh.vertices.push(Point::new(10.0, 10.0));
        let outside = mesh.num_vertices() - 1;
        assert_eq!(
            mesh.locate(outside),
            Err(TriangulationError::PointLocationFailed { vertex: outside })
        );
        Ok(())
    }
}
