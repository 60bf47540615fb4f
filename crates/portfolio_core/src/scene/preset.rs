//! Declared 3D backdrop for each page.

use crate::model::node::{AnimatedNode, CubePalette};
use crate::model::transform::Vec3;
use crate::nav::route::Route;
use crate::scene::particle_field;
use std::f64::consts::TAU;

/// One animated entity in a page backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSpec {
    Cube { position: Vec3, palette: CubePalette },
    Ring { position: Vec3 },
    ParticleCloud { count: usize },
}

/// Camera placement plus its idle orbit speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub fov_degrees: f64,
    pub auto_rotate_speed: f64,
}

impl CameraRig {
    /// Orbit angle around the vertical axis at scene time `t`.
    ///
    /// A speed of `1.0` completes one orbit every 60 seconds.
    pub fn azimuth(&self, t: f64) -> f64 {
        TAU / 60.0 * self.auto_rotate_speed * t
    }

    /// Camera position after orbiting the origin for `t` seconds.
    pub fn position_at(&self, t: f64) -> Vec3 {
        let angle = self.azimuth(t);
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.position.x * cos + self.position.z * sin,
            self.position.y,
            -self.position.x * sin + self.position.z * cos,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenePreset {
    pub camera: CameraRig,
    pub nodes: Vec<NodeSpec>,
}

impl ScenePreset {
    /// Backdrop for `route`, or `None` for pages without a 3D scene.
    pub fn for_route(route: &Route) -> Option<Self> {
        let preset = match route {
            Route::Login => Self {
                camera: camera(10.0, 0.5),
                nodes: vec![
                    NodeSpec::ParticleCloud { count: 2000 },
                    cube(-3.0, 0.0, CubePalette::VIOLET),
                    cube(3.0, 0.0, CubePalette::CYAN),
                    ring(-5.0),
                ],
            },
            Route::Home => Self {
                camera: camera(8.0, 0.5),
                nodes: vec![
                    NodeSpec::ParticleCloud { count: 1500 },
                    cube(-2.0, 1.0, CubePalette::VIOLET),
                    cube(2.0, -1.0, CubePalette::CYAN),
                ],
            },
            Route::About => Self {
                camera: camera(10.0, 0.3),
                nodes: vec![NodeSpec::ParticleCloud { count: 800 }, ring(-5.0)],
            },
            Route::Freelancer => Self {
                camera: camera(8.0, 0.4),
                nodes: vec![
                    NodeSpec::ParticleCloud { count: 600 },
                    cube(-3.0, 2.0, CubePalette::VIOLET),
                    cube(3.0, -2.0, CubePalette::CYAN),
                ],
            },
            Route::Projects | Route::NotFound(_) => return None,
        };
        Some(preset)
    }

    /// Orbit angle of this preset's camera at scene time `t`.
    pub fn camera_azimuth(&self, t: f64) -> f64 {
        self.camera.azimuth(t)
    }

    /// Builds fresh nodes for one mount. Particle clouds are generated here.
    pub fn instantiate(&self) -> Vec<AnimatedNode> {
        self.nodes
            .iter()
            .map(|node| match *node {
                NodeSpec::Cube { position, palette } => AnimatedNode::cube(position, palette),
                NodeSpec::Ring { position } => AnimatedNode::ring(position),
                NodeSpec::ParticleCloud { count } => {
                    let seed = rand::random::<u64>();
                    AnimatedNode::particle_cloud(particle_field::generate_seeded(count, seed), seed)
                }
            })
            .collect()
    }
}

fn camera(distance: f64, auto_rotate_speed: f64) -> CameraRig {
    CameraRig {
        position: Vec3::new(0.0, 0.0, distance),
        fov_degrees: 60.0,
        auto_rotate_speed,
    }
}

fn cube(x: f64, y: f64, palette: CubePalette) -> NodeSpec {
    NodeSpec::Cube {
        position: Vec3::new(x, y, 0.0),
        palette,
    }
}

fn ring(z: f64) -> NodeSpec {
    NodeSpec::Ring {
        position: Vec3::new(0.0, 0.0, z),
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeSpec, ScenePreset};
    use crate::model::node::NodeKind;
    use crate::nav::route::Route;

    #[test]
    fn login_scene_matches_declared_backdrop() {
        let preset = ScenePreset::for_route(&Route::Login).expect("login has a scene");
        assert_eq!(preset.camera.position.z, 10.0);
        assert_eq!(preset.nodes.len(), 4);
        assert_eq!(preset.nodes[0], NodeSpec::ParticleCloud { count: 2000 });

        let nodes = preset.instantiate();
        match &nodes[0].kind {
            NodeKind::ParticleCloud { cloud } => assert_eq!(cloud.count(), 2000),
            other => panic!("unexpected first node: {other:?}"),
        }
    }

    #[test]
    fn projects_and_not_found_have_no_scene() {
        assert!(ScenePreset::for_route(&Route::Projects).is_none());
        assert!(ScenePreset::for_route(&Route::NotFound("/nope".to_string())).is_none());
    }

    #[test]
    fn camera_orbit_is_pure_in_time() {
        let preset = ScenePreset::for_route(&Route::Home).expect("home has a scene");
        let rig = preset.camera;
        assert_eq!(rig.azimuth(0.0), 0.0);
        let full_turn = 60.0 / rig.auto_rotate_speed;
        assert!((preset.camera_azimuth(full_turn) - std::f64::consts::TAU).abs() < 1e-9);
        let back = rig.position_at(full_turn);
        assert!((back.z - rig.position.z).abs() < 1e-9);
        assert!(back.x.abs() < 1e-9);
    }
}
