//! Verlet-integrated particle

use keel_math::Vec3;

/// A point mass integrated with the Verlet scheme: current and previous
/// position plus accumulated acceleration, no explicit velocity state.
///
/// An inverse mass of zero pins the node; infinite or non-positive mass
/// also yields inverse mass zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringNode {
    pub position: Vec3,
    pub old_position: Vec3,
    pub acceleration: Vec3,
    inv_mass: f32,
}

impl SpringNode {
    /// Node at rest at `position` with unit mass.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            old_position: position,
            acceleration: Vec3::ZERO,
            inv_mass: 1.0,
        }
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Set the node's mass. Non-positive or non-finite masses pin the node
    /// (inverse mass zero).
    pub fn set_mass(&mut self, mass: f32) {
        if mass <= 0.0 || !mass.is_finite() {
            log::debug!("non-finite or non-positive mass {mass}; pinning node");
            self.inv_mass = 0.0;
        } else {
            self.inv_mass = 1.0 / mass;
        }
    }

    /// Pin the node in place.
    pub fn pin(&mut self) {
        self.inv_mass = 0.0;
    }

    /// Accumulate a force for the next step, scaled by inverse mass.
    /// Pinned nodes ignore forces.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force * self.inv_mass;
    }

    /// Accumulate a mass-independent acceleration (gravity-like fields).
    /// Pinned nodes still ignore it.
    #[inline]
    pub fn apply_acceleration(&mut self, acceleration: Vec3) {
        if !self.is_pinned() {
            self.acceleration += acceleration;
        }
    }

    /// Estimated velocity from the position pair, in units per step.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.position - self.old_position
    }

    /// One Verlet step: `p' = p + (p - p_old) + a * dt^2`, then the
    /// accumulated acceleration is cleared. Pinned nodes only clear.
    pub fn verlet_step(&mut self, dt: f32) {
        if self.is_pinned() {
            self.acceleration = Vec3::ZERO;
            return;
        }
        let next = self.position + (self.position - self.old_position)
            + self.acceleration * (dt * dt);
        self.old_position = self.position;
        self.position = next;
        self.acceleration = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_at_rest_stays() {
        let mut node = SpringNode::new(Vec3::new(1.0, 2.0, 3.0));
        node.verlet_step(0.1);
        assert_eq!(node.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_constant_acceleration_integrates() {
        let mut node = SpringNode::new(Vec3::ZERO);
        let dt = 0.5;
        node.apply_acceleration(Vec3::new(0.0, -10.0, 0.0));
        node.verlet_step(dt);
        // first step: a * dt^2
        approx::assert_relative_eq!(node.position.y, -10.0 * dt * dt, epsilon = 1e-6);
        // acceleration cleared after the step
        assert_eq!(node.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_velocity_carries_between_steps() {
        let mut node = SpringNode::new(Vec3::ZERO);
        node.apply_acceleration(Vec3::new(1.0, 0.0, 0.0));
        node.verlet_step(1.0);
        let first = node.position.x;
        node.verlet_step(1.0);
        // no new force: inertia keeps the same displacement
        assert!((node.position.x - 2.0 * first).abs() < 1e-6);
    }

    #[test]
    fn test_pinned_node_ignores_forces() {
        let mut node = SpringNode::new(Vec3::ZERO);
        node.pin();
        node.apply_force(Vec3::new(100.0, 0.0, 0.0));
        node.apply_acceleration(Vec3::new(0.0, 100.0, 0.0));
        node.verlet_step(0.1);
        assert_eq!(node.position, Vec3::ZERO);
    }

    #[test]
    fn test_mass_edge_cases_pin() {
        let mut node = SpringNode::new(Vec3::ZERO);
        node.set_mass(0.0);
        assert!(node.is_pinned());
        node.set_mass(f32::INFINITY);
        assert!(node.is_pinned());
        node.set_mass(-1.0);
        assert!(node.is_pinned());
        node.set_mass(2.0);
        assert_eq!(node.inv_mass(), 0.5);
    }

    #[test]
    fn test_force_scales_by_inverse_mass() {
        let mut heavy = SpringNode::new(Vec3::ZERO);
        heavy.set_mass(10.0);
        let mut light = SpringNode::new(Vec3::ZERO);
        light.set_mass(1.0);

        heavy.apply_force(Vec3::new(10.0, 0.0, 0.0));
        light.apply_force(Vec3::new(10.0, 0.0, 0.0));
        assert!((heavy.acceleration.x - 1.0).abs() < 1e-6);
        assert!((light.acceleration.x - 10.0).abs() < 1e-6);
    }
}
