// Copyright @yucwang 2026

use super::SceneSetup;
use crate::core::bsdf::BSDF;
use crate::core::scene::Scene;
use crate::materials::glossy::GlossyBSDF;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::sphere::Sphere;
use crate::shapes::triangle_mesh::TriangleMesh;

use std::sync::Arc;

const LIGHT_RADII: [Float; 4] = [0.05, 0.15, 0.4, 1.0];
const PLATE_EXPONENTS: [Float; 4] = [4096.0, 512.0, 64.0, 8.0];

/// Four glossy plates of decreasing sharpness lit by four spherical lights of
/// increasing size and equal power. Needs no model files.
pub fn mis_spheres(width: usize, height: usize) -> SceneSetup {
    let mut scene = Scene::new();

    let floor: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.4, 0.4, 0.4)));
    scene.add(Arc::new(TriangleMesh::quad(Vector3f::new(-50.0, -1.0, -50.0),
                                          Vector3f::new(0.0, 0.0, 100.0),
                                          Vector3f::new(100.0, 0.0, 0.0),
                                          floor)));

    for (i, exponent) in PLATE_EXPONENTS.iter().enumerate() {
        let plate: Arc<dyn BSDF> = Arc::new(GlossyBSDF::new(RGBSpectrum::new(0.35, 0.35, 0.35), *exponent));
        let step = i as Float;
        scene.add(Arc::new(TriangleMesh::quad(Vector3f::new(-4.0, 0.4 + 0.9 * step, 1.5 - 1.5 * step),
                                              Vector3f::new(0.0, -0.3, 1.2),
                                              Vector3f::new(8.0, 0.0, 0.0),
                                              plate)));
    }

    for (i, radius) in LIGHT_RADII.iter().enumerate() {
        let power = 1.0 / (radius * radius);
        let light: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::emissive(
            RGBSpectrum::zeros(),
            RGBSpectrum::new(power, power, power)));
        let x = -3.75 + 2.5 * i as Float;
        scene.add(Arc::new(Sphere::new(Vector3f::new(x, 6.0, -4.0), *radius, light)));
    }

    scene.build_bvh();

    let camera = PerspectiveCamera::new(Vector3f::new(0.0, 3.0, 12.0),
                                        Vector3f::new(0.3, 1.15, 0.6),
                                        Vector3f::new(0.0, 1.0, 0.0),
                                        (35.0 as Float).to_radians(),
                                        width,
                                        height);
    SceneSetup { scene, camera }
}
