//! # keel_spring - Verlet Spring Particles
//!
//! A minimal position-based simulation layer built directly on the
//! `keel_math` vector types: Verlet-integrated nodes, pluggable external
//! forces, and spring constraints between node pairs.

pub mod node;
pub mod force;
pub mod system;

pub use node::SpringNode;
pub use force::{DirectionalForce, DragForce, SpringNodeForce};
pub use system::{Spring, SpringSystem};
