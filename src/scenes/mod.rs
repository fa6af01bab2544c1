// Copyright @yucwang 2026

//! Built-in scenes. Each builder returns a finalized scene (BVH built) and
//! the camera it is meant to be viewed from.

pub mod cornell_box;
pub mod mis_spheres;

use crate::core::scene::Scene;
use crate::sensors::perspective::PerspectiveCamera;

pub use self::cornell_box::cornell_box;
pub use self::mis_spheres::mis_spheres;

pub struct SceneSetup {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
}
