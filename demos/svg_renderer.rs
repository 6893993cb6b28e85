use anyhow::Result;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use svg::node::element::{Circle, Group, Line, Polygon, Rectangle};
use svg::Document;

use delaunay_mesh::{Entity, GenerateOptions, Mesh, Point, Renderer};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const NUM_POINTS: usize = 300;

/// Collects drawing calls into svg elements. The y axis is flipped so that the picture
/// shows the mesh the right way up.
#[derive(Default)]
struct SvgRenderer {
    triangles: Vec<Polygon>,
    lines: Vec<Line>,
    points: Vec<Circle>,
}

impl SvgRenderer {
    fn new() -> Self {
        Self::default()
    }

    fn convert(point: Point) -> (f64, f64) {
        (point.x, HEIGHT - point.y)
    }

    fn into_document(self) -> Document {
        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", "white");

        Document::new()
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .set("viewBox", format!("0 0 {} {}", WIDTH, HEIGHT))
            .add(background)
            .add(
                self.triangles
                    .into_iter()
                    .fold(Group::new().set("fill", "#d9e8f5"), Group::add),
            )
            .add(
                self.lines.into_iter().fold(
                    Group::new()
                        .set("stroke", "#1f3b57")
                        .set("stroke-width", 0.8),
                    Group::add,
                ),
            )
            .add(
                self.points
                    .into_iter()
                    .fold(Group::new().set("fill", "#c2410c"), Group::add),
            )
    }
}

impl Renderer for SvgRenderer {
    fn draw_point(&mut self, position: Point) {
        let (cx, cy) = Self::convert(position);
        let circle = Circle::new().set("cx", cx).set("cy", cy).set("r", 2.0);
        self.points.push(circle);
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let (x1, y1) = Self::convert(from);
        let (x2, y2) = Self::convert(to);
        let line = Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2);
        self.lines.push(line);
    }

    fn draw_triangle(&mut self, corners: [Point; 3]) {
        let points = corners
            .iter()
            .map(|corner| {
                let (x, y) = Self::convert(*corner);
                format!("{},{}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let polygon = Polygon::new().set("points", points);
        self.triangles.push(polygon);
    }
}

/// Triangulates random points in a window and writes the result to an svg file.
///
/// Usage: `cargo run --example svg_renderer [output path]`
fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "delaunay_mesh.svg".to_string());

    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let x_range = Uniform::new_inclusive(20.0, WIDTH - 20.0);
    let y_range = Uniform::new_inclusive(20.0, HEIGHT - 20.0);
    let points = (0..NUM_POINTS)
        .map(|_| Point::new(x_range.sample(&mut rng), y_range.sample(&mut rng)))
        .collect();

    let mesh = Mesh::generate_with_options(points, &GenerateOptions::new().with_seed(7))?;
    println!(
        "Triangulated {} points into {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    );

    let mut renderer = SvgRenderer::new();
    Entity::Mesh(mesh).draw(&mut renderer);
    svg::save(&path, &renderer.into_document())?;
    println!("Saved {}", path);
    Ok(())
}
