use crate::{Mesh, Point};

/// An object that can be handed to a [Renderer].
///
/// Meshes are the only drawable kind at the moment.
#[derive(Clone, Debug)]
pub enum Entity {
    /// A finished triangulation.
    Mesh(Mesh),
}

impl From<Mesh> for Entity {
    fn from(mesh: Mesh) -> Self {
        Entity::Mesh(mesh)
    }
}

impl Entity {
    /// Draws this entity, see [draw].
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        draw(self, renderer)
    }
}

/// A drawing backend.
///
/// Implementations are created and owned by the caller and passed to [draw] for every
/// entity. Coordinates are passed through unchanged, any view transformation is up to the
/// implementation.
pub trait Renderer {
    /// Draws a single vertex.
    fn draw_point(&mut self, position: Point);

    /// Draws a straight edge.
    fn draw_line(&mut self, from: Point, to: Point);

    /// Draws a filled triangle. The corners are ordered counter clockwise.
    fn draw_triangle(&mut self, corners: [Point; 3]);
}

/// Draws an entity.
///
/// For a mesh, every live face is drawn as one triangle followed by its three edges, in
/// the order given by the face's half-edge cycle. Afterwards, every vertex is drawn as a
/// point. Edges shared by two faces are drawn twice.
pub fn draw<R: Renderer + ?Sized>(entity: &Entity, renderer: &mut R) {
    match entity {
        Entity::Mesh(mesh) => {
            for &face in mesh.faces() {
                let corners = mesh.face_positions(face);
                renderer.draw_triangle(corners);
                for i in 0..3 {
                    renderer.draw_line(corners[i], corners[(i + 1) % 3]);
                }
            }
            for vertex in mesh.vertices() {
                renderer.draw_point(*vertex);
            }
        }
    }
}
