use super::half_edge::HalfEdge;
use super::mesh::Mesh;
use crate::TriangulationError;

/// Creates a face from three vertices that must be ordered counter clockwise.
///
/// All three half-edges border the exterior. Returns the face's representative.
pub fn create_seed_face(mesh: &mut Mesh, vertices: [usize; 3]) -> usize {
    let e0 = mesh.edges.len();
    for (i, vertex) in vertices.into_iter().enumerate() {
        mesh.edges.push(HalfEdge::new(vertex, e0 + (i + 1) % 3, None));
    }
    mesh.faces.insert(e0);
    e0
}

/// Returns the registered representative of the face `edge` belongs to.
pub fn find_face(mesh: &Mesh, edge: usize) -> Result<usize, TriangulationError> {
    let mut current = edge;
    loop {
        if mesh.faces.contains(&current) {
            return Ok(current);
        }
        current = mesh.edges[current].next;
        if current == edge {
            return Err(TriangulationError::FaceLookupFailed { edge });
        }
    }
}

/// Inserts `vertex` into the triangle represented by `face`, splitting it into three.
///
/// Returns the three original half-edges. Each of them now forms a triangle with the new
/// vertex and keeps its twin, so they are the edges that may violate the Delaunay property.
pub fn split_face(
    mesh: &mut Mesh,
    face: usize,
    vertex: usize,
) -> Result<[usize; 3], TriangulationError> {
    // All edges are oriented counter clockwise
    //
    // Original triangle:
    //       v2
    //      / \
    //     /   \
    //    /e2 e1\
    //   /       \
    //  /   e0    \
    // v0_________v1
    //
    // With v inserted, s_i runs from the end of e_i to v and t_i from v to the start of e_i.
    // s_i and t_(i+1) are twins:
    //
    //       v2
    //      /|\
    //     / | \
    //    /  v  \
    //   / /   \ \
    //  //       \\
    // v0_________v1
    if !mesh.is_triangle(face) {
        return Err(TriangulationError::NotATriangle { face });
    }
    let e = mesh.face_edges(face);
    let corners = e.map(|edge| mesh.edges[edge].vertex);

    let base = mesh.edges.len();
    let s = [base, base + 1, base + 2];
    let t = [base + 3, base + 4, base + 5];

    for i in 0..3 {
        mesh.edges
            .push(HalfEdge::new(corners[(i + 1) % 3], t[i], Some(t[(i + 1) % 3])));
    }
    for i in 0..3 {
        mesh.edges
            .push(HalfEdge::new(vertex, e[i], Some(s[(i + 2) % 3])));
    }
    for i in 0..3 {
        mesh.edges[e[i]].next = s[i];
    }

    // e[0] keeps representing its face, the other two become new faces.
    mesh.faces.insert(e[1]);
    mesh.faces.insert(e[2]);
    Ok(e)
}

/// Replaces the diagonal of the quad formed by the two faces sharing `edge`.
///
/// Returns the quad's four outer edges. `edge` and its twin are reused for the new diagonal
/// and become the representatives of the two new faces. Fails if `edge` has no twin.
pub fn flip_edge(mesh: &mut Mesh, edge: usize) -> Result<[usize; 4], TriangulationError> {
    //  Before:                After:
    //
    //       d                     d
    //     /   \                 / | \
    //   ep  e  en             ep  |  en
    //   /  ---> \             /   |   \
    //  p ------- q    =>     p  e | t  q
    //   \ <---  /             \   |   /
    //   tn  t  tp             tn  |  tp
    //     \   /                 \ | /
    //       c                     c
    //
    // e runs p -> q before and c -> d after the flip.
    let e = edge;
    let t = mesh.edges[e]
        .twin
        .ok_or(TriangulationError::FaceLookupFailed { edge })?;

    let e_face = find_face(mesh, e)?;
    let t_face = find_face(mesh, t)?;

    let en = mesh.edges[e].next;
    let ep = mesh.edges[en].next;
    let tn = mesh.edges[t].next;
    let tp = mesh.edges[tn].next;

    let d = mesh.edges[ep].vertex;
    let c = mesh.edges[tp].vertex;

    mesh.edges[e].vertex = c;
    mesh.edges[e].next = ep;
    mesh.edges[ep].next = tn;
    mesh.edges[tn].next = e;

    mesh.edges[t].vertex = d;
    mesh.edges[t].next = tp;
    mesh.edges[tp].next = en;
    mesh.edges[en].next = t;

    mesh.faces.remove(&e_face);
    mesh.faces.remove(&t_face);
    mesh.faces.insert(e);
    mesh.faces.insert(t);

    Ok([en, ep, tn, tp])
}

/// Removes a face and detaches its half-edges from their twins.
///
/// The half-edges stay in storage. Does nothing if `face` is not a registered
/// representative.
pub fn remove_face(mesh: &mut Mesh, face: usize) {
    if !mesh.faces.remove(&face) {
        return;
    }
    let mut current = face;
    loop {
        if let Some(twin) = mesh.edges[current].twin.take() {
            mesh.edges[twin].twin = None;
        }
        current = mesh.edges[current].next;
        if current == face {
            break;
        }
    }
}
