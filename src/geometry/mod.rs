pub mod displace;
pub mod mesh;
pub mod noise;
pub mod primitives;
pub mod wireframe;

pub use displace::{Relief, ShapeFamily, displace};
pub use mesh::TriangleMesh;
pub use wireframe::wireframe_edges;
