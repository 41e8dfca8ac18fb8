use std::f64::consts::PI;

use crate::calculator::ToneHoleDescriptor;
use crate::params::InstrumentParameters;

pub type Vertex = [f64; 3];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Segments around the bore circumference.
    pub segments: usize,
    /// Segments around each hole cutter.
    pub hole_segments: usize,
    pub include_hole_cutters: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            segments: 48,
            hole_segments: 24,
            include_hole_cutters: true,
        }
    }
}

/// Triangle mesh with named groups. Indices are 0-based.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    groups: Vec<(String, Vec<[usize; 3]>)>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Starts a new group; subsequent faces land in it.
    pub fn set_group(&mut self, name: &str) {
        if self.groups.last().map(|(n, _)| n.as_str()) != Some(name) {
            self.groups.push((name.to_string(), Vec::new()));
        }
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.vertices.push([x, y, z]);
        self.vertices.len() - 1
    }

    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) {
        if self.groups.is_empty() {
            self.set_group("default");
        }
        if let Some((_, faces)) = self.groups.last_mut() {
            faces.push([a, b, c]);
        }
    }

    /// Quad wound a -> b -> c -> d, split along a-c.
    pub fn add_quad(&mut self, a: usize, b: usize, c: usize, d: usize) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[[usize; 3]])> {
        self.groups
            .iter()
            .filter(|(_, faces)| !faces.is_empty())
            .map(|(name, faces)| (name.as_str(), faces.as_slice()))
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|(_, faces)| faces.len()).sum()
    }

    pub fn corners(&self, face: &[usize; 3]) -> [Vertex; 3] {
        [
            self.vertices[face[0]],
            self.vertices[face[1]],
            self.vertices[face[2]],
        ]
    }
}

/// Unit normal from the winding order; zero for degenerate triangles.
pub fn face_normal([a, b, c]: [Vertex; 3]) -> Vertex {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len < 1e-12 {
        [0.0, 0.0, 0.0]
    } else {
        [n[0] / len, n[1] / len, n[2] / len]
    }
}

/// Ring of vertices around the X axis at `x`.
fn add_ring(mesh: &mut Mesh, x: f64, r: f64, segments: usize) -> Vec<usize> {
    (0..segments)
        .map(|i| {
            let theta = 2.0 * PI * (i as f64) / (segments as f64);
            mesh.add_vertex(x, r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Ring in the XZ plane at height `y`, centred on `cx`.
fn add_cutter_ring(mesh: &mut Mesh, cx: f64, y: f64, r: f64, segments: usize) -> Vec<usize> {
    (0..segments)
        .map(|i| {
            let theta = 2.0 * PI * (i as f64) / (segments as f64);
            mesh.add_vertex(cx + r * theta.cos(), y, r * theta.sin())
        })
        .collect()
}

fn stitch_rings(mesh: &mut Mesh, r1: &[usize], r2: &[usize], flip: bool) {
    let segments = r1.len();
    for i in 0..segments {
        let next = (i + 1) % segments;
        if flip {
            mesh.add_quad(r1[i], r2[i], r2[next], r1[next]);
        } else {
            mesh.add_quad(r1[i], r1[next], r2[next], r2[i]);
        }
    }
}

fn fan_cap(mesh: &mut Mesh, ring: &[usize], flip: bool) {
    for k in 1..ring.len() - 1 {
        if flip {
            mesh.add_triangle(ring[0], ring[k + 1], ring[k]);
        } else {
            mesh.add_triangle(ring[0], ring[k], ring[k + 1]);
        }
    }
}

/// Builds a tapered tube along +X: the tip end at x = 0, the base end at
/// x = length, matching the diameter interpolation of the calculator.
///
/// The outer wall is the bore offset by `wall_thickness`. Hole cutters are
/// closed cylinders through the wall meant for a boolean subtract in a CAD
/// tool; they are not merged into the tube.
pub fn build_bore_mesh(
    params: &InstrumentParameters,
    holes: &[ToneHoleDescriptor],
    options: &MeshOptions,
) -> Mesh {
    let mut mesh = Mesh::new();
    let segments = options.segments.max(3);

    mesh.set_group("BoreBody");

    let r_tip = params.tip_diameter / 2.0;
    let r_base = params.base_diameter / 2.0;
    let wall = params.wall_thickness;

    let tip_in = add_ring(&mut mesh, 0.0, r_tip, segments);
    let tip_out = add_ring(&mut mesh, 0.0, r_tip + wall, segments);
    let base_in = add_ring(&mut mesh, params.length, r_base, segments);
    let base_out = add_ring(&mut mesh, params.length, r_base + wall, segments);

    // Outer surface faces away from the axis, inner surface towards it.
    stitch_rings(&mut mesh, &tip_out, &base_out, false);
    stitch_rings(&mut mesh, &tip_in, &base_in, true);

    // Annular rims: -X at the tip, +X at the base.
    stitch_rings(&mut mesh, &tip_out, &tip_in, true);
    stitch_rings(&mut mesh, &base_out, &base_in, false);

    if options.include_hole_cutters && !holes.is_empty() {
        mesh.set_group("HoleCutters");
        let hole_segments = options.hole_segments.max(3);

        for hole in holes {
            let r_in = hole.bore_diameter_at_position / 2.0;
            let y_start = r_in - 0.5;
            let y_end = r_in + wall + 0.5;
            let r_hole = hole.hole_size_mm / 2.0;

            let bottom = add_cutter_ring(&mut mesh, hole.position, y_start, r_hole, hole_segments);
            let top = add_cutter_ring(&mut mesh, hole.position, y_end, r_hole, hole_segments);

            stitch_rings(&mut mesh, &bottom, &top, true);
            fan_cap(&mut mesh, &bottom, false);
            fan_cap(&mut mesh, &top, true);
        }
    }

    mesh
}
