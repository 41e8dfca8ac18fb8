use crate::error::Result;
use crate::geometry::{face_normal, Mesh};

/// Serializes a mesh for download.
pub trait MeshExporter {
    fn export(&self, mesh: &Mesh) -> Result<Vec<u8>>;

    /// Suggested file extension, without the dot.
    fn extension(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    Ascii,
    #[default]
    Binary,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StlExporter {
    pub format: StlFormat,
}

impl StlExporter {
    pub fn new(format: StlFormat) -> Self {
        StlExporter { format }
    }

    /// One `solid` block per mesh group.
    fn to_ascii(mesh: &Mesh) -> String {
        let mut out = String::new();
        for (name, faces) in mesh.groups() {
            out.push_str(&format!("solid {}\n", name));
            for face in faces {
                let corners = mesh.corners(face);
                let n = face_normal(corners);
                out.push_str(&format!("  facet normal {:e} {:e} {:e}\n", n[0], n[1], n[2]));
                out.push_str("    outer loop\n");
                for v in corners {
                    out.push_str(&format!("      vertex {:e} {:e} {:e}\n", v[0], v[1], v[2]));
                }
                out.push_str("    endloop\n");
                out.push_str("  endfacet\n");
            }
            out.push_str(&format!("endsolid {}\n", name));
        }
        out
    }

    fn to_binary(mesh: &Mesh) -> Vec<u8> {
        let count = mesh.triangle_count();
        let mut out = Vec::with_capacity(84 + 50 * count);

        let mut header = [0u8; 80];
        let label = b"bore designer export";
        header[..label.len()].copy_from_slice(label);
        out.extend_from_slice(&header);
        out.extend_from_slice(&(count as u32).to_le_bytes());

        for (_, faces) in mesh.groups() {
            for face in faces {
                let corners = mesh.corners(face);
                let n = face_normal(corners);
                for component in n.iter().chain(corners.iter().flatten()) {
                    out.extend_from_slice(&(*component as f32).to_le_bytes());
                }
                out.extend_from_slice(&0u16.to_le_bytes());
            }
        }
        out
    }
}

impl MeshExporter for StlExporter {
    fn export(&self, mesh: &Mesh) -> Result<Vec<u8>> {
        let bytes = match self.format {
            StlFormat::Ascii => Self::to_ascii(mesh).into_bytes(),
            StlFormat::Binary => Self::to_binary(mesh),
        };
        log::debug!(
            "exported {} triangles as {:?} STL ({} bytes)",
            mesh.triangle_count(),
            self.format,
            bytes.len()
        );
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "stl"
    }
}
