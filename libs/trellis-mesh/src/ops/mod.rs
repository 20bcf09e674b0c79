//! # Topology Operations
//!
//! Stateless geometry operations that write into a [`Mesh`](crate::Mesh):
//!
//! - **basis**: Plane frames, planar and spherical projection, winding
//! - **topology**: Circle rings, ribbons, fans and quads
//! - **wireframe**: Line emission along used triangle edges

pub mod basis;
pub mod topology;
pub mod wireframe;

pub use basis::{front_normal, spherical_point, PlaneBasis};
pub use topology::{add_circle_points, add_face, add_fan, add_ribbon, circle_points};
pub use wireframe::add_wireframe;
