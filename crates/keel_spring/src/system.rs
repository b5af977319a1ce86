//! Spring system: nodes, spring constraints, and the update loop

use crate::force::SpringNodeForce;
use crate::node::SpringNode;

/// A spring constraint between two nodes, by index into the system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub node_a: usize,
    pub node_b: usize,
    pub rest_length: f32,
    pub stiffness: f32,
}

impl Spring {
    pub const fn new(node_a: usize, node_b: usize, rest_length: f32, stiffness: f32) -> Self {
        Self {
            node_a,
            node_b,
            rest_length,
            stiffness,
        }
    }
}

/// A collection of nodes, springs between them, and external forces,
/// advanced one Verlet step at a time.
#[derive(Default)]
pub struct SpringSystem {
    pub nodes: Vec<SpringNode>,
    springs: Vec<Spring>,
    forces: Vec<Box<dyn SpringNodeForce>>,
}

impl SpringSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index.
    pub fn add_node(&mut self, node: SpringNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Connect two existing nodes with a spring at their current distance.
    /// Indices outside the node list are ignored with a warning.
    pub fn connect(&mut self, node_a: usize, node_b: usize, stiffness: f32) {
        if node_a >= self.nodes.len() || node_b >= self.nodes.len() {
            log::warn!(
                "spring references missing node ({node_a}, {node_b}); {} nodes present",
                self.nodes.len()
            );
            return;
        }
        let rest = self.nodes[node_a]
            .position
            .distance(self.nodes[node_b].position);
        self.springs.push(Spring::new(node_a, node_b, rest, stiffness));
    }

    pub fn add_spring(&mut self, spring: Spring) {
        self.springs.push(spring);
    }

    pub fn add_force(&mut self, force: Box<dyn SpringNodeForce>) {
        self.forces.push(force);
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// One simulation step: external forces, then spring forces, then
    /// Verlet integration of every node.
    pub fn update(&mut self, dt: f32) {
        for node in &mut self.nodes {
            for force in &self.forces {
                force.apply(node);
            }
        }

        self.apply_spring_forces();

        for node in &mut self.nodes {
            node.verlet_step(dt);
        }
    }

    /// Hooke's law along each spring: `f = stiffness * (length - rest)`
    /// toward the other end, applied to both nodes.
    fn apply_spring_forces(&mut self) {
        for spring in &self.springs {
            let (a, b) = (spring.node_a, spring.node_b);
            if a >= self.nodes.len() || b >= self.nodes.len() {
                continue;
            }
            let delta = self.nodes[b].position - self.nodes[a].position;
            let length = delta.length();
            if length <= 0.0 {
                continue;
            }
            let magnitude = spring.stiffness * (length - spring.rest_length);
            let force = delta * (magnitude / length);
            self.nodes[a].apply_force(force);
            self.nodes[b].apply_force(-force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::DirectionalForce;
    use keel_math::Vec3;

    #[test]
    fn test_stretched_spring_pulls_ends_together() {
        let mut system = SpringSystem::new();
        let a = system.add_node(SpringNode::new(Vec3::ZERO));
        let b = system.add_node(SpringNode::new(Vec3::new(1.0, 0.0, 0.0)));
        system.add_spring(Spring::new(a, b, 0.5, 10.0));

        let before = system.nodes[a].position.distance(system.nodes[b].position);
        system.update(0.05);
        let after = system.nodes[a].position.distance(system.nodes[b].position);
        assert!(after < before);
    }

    #[test]
    fn test_connect_uses_current_distance_as_rest() {
        let mut system = SpringSystem::new();
        let a = system.add_node(SpringNode::new(Vec3::ZERO));
        let b = system.add_node(SpringNode::new(Vec3::new(2.0, 0.0, 0.0)));
        system.connect(a, b, 1.0);
        assert!((system.springs()[0].rest_length - 2.0).abs() < 1e-6);

        // at rest: no movement
        system.update(0.05);
        assert!((system.nodes[b].position.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_connect_rejects_bad_indices() {
        let mut system = SpringSystem::new();
        system.add_node(SpringNode::new(Vec3::ZERO));
        system.connect(0, 5, 1.0);
        assert!(system.springs().is_empty());
    }

    #[test]
    fn test_pinned_anchor_holds_chain() {
        let mut system = SpringSystem::new();
        let mut anchor = SpringNode::new(Vec3::ZERO);
        anchor.pin();
        let a = system.add_node(anchor);
        let b = system.add_node(SpringNode::new(Vec3::new(0.0, -1.0, 0.0)));
        system.connect(a, b, 50.0);
        system.add_force(Box::new(DirectionalForce::gravity()));

        for _ in 0..10 {
            system.update(0.01);
        }

        // anchor never moves; the hanging node stays attached below it
        assert_eq!(system.nodes[a].position, Vec3::ZERO);
        assert!(system.nodes[b].position.y < 0.0);
        assert!(system.nodes[b].position.y > -2.0);
    }
}
