//! External forces applied to spring nodes

use crate::node::SpringNode;
use keel_math::Vec3;

/// An external influence applied to a node each step, before integration.
pub trait SpringNodeForce {
    fn apply(&self, node: &mut SpringNode);
}

/// Constant acceleration field (gravity, wind as acceleration).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalForce {
    pub acceleration: Vec3,
}

impl DirectionalForce {
    pub const fn new(acceleration: Vec3) -> Self {
        Self { acceleration }
    }

    /// Standard downward gravity.
    pub fn gravity() -> Self {
        Self::new(Vec3::new(0.0, -9.81, 0.0))
    }
}

impl SpringNodeForce for DirectionalForce {
    fn apply(&self, node: &mut SpringNode) {
        node.apply_acceleration(self.acceleration);
    }
}

/// Velocity-proportional damping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragForce {
    pub coefficient: f32,
}

impl DragForce {
    pub const fn new(coefficient: f32) -> Self {
        Self { coefficient }
    }
}

impl SpringNodeForce for DragForce {
    fn apply(&self, node: &mut SpringNode) {
        let drag = -node.velocity() * self.coefficient;
        node.apply_force(drag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_force_accelerates() {
        let mut node = SpringNode::new(Vec3::ZERO);
        DirectionalForce::gravity().apply(&mut node);
        assert!((node.acceleration.y + 9.81).abs() < 1e-6);
    }

    #[test]
    fn test_directional_force_skips_pinned() {
        let mut node = SpringNode::new(Vec3::ZERO);
        node.pin();
        DirectionalForce::gravity().apply(&mut node);
        assert_eq!(node.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let mut node = SpringNode::new(Vec3::ZERO);
        // give it velocity by displacing from the old position
        node.position = Vec3::new(1.0, 0.0, 0.0);
        DragForce::new(0.5).apply(&mut node);
        assert!(node.acceleration.x < 0.0);
    }
}
