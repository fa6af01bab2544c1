// Copyright @yucwang 2026

use super::SceneSetup;
use crate::core::bsdf::BSDF;
use crate::core::scene::Scene;
use crate::io::obj_utils::ObjLoadError;
use crate::materials::glossy::GlossyBSDF;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::sphere::Sphere;
use crate::shapes::triangle_mesh::TriangleMesh;

use std::path::Path;
use std::sync::Arc;

const FOV_Y_DEGREES: Float = 40.0;

fn light_emission() -> RGBSpectrum {
    RGBSpectrum::new(0.747 + 0.058, 0.747 + 0.258, 0.747) * 1.0
        + RGBSpectrum::new(0.740 + 0.287, 0.740 + 0.160, 0.740) * 2.6
        + RGBSpectrum::new(0.737 + 0.642, 0.737 + 0.159, 0.737) * 2.0
}

pub fn camera(width: usize, height: usize) -> PerspectiveCamera {
    PerspectiveCamera::new(Vector3f::new(278.0, 273.0, -800.0),
                           Vector3f::new(278.0, 273.0, 0.0),
                           Vector3f::new(0.0, 1.0, 0.0),
                           FOV_Y_DEGREES.to_radians(),
                           width,
                           height)
}

/// Cornell box with a glossy floor strip and back wall, a spherical light,
/// a green ball and the Stanford bunny. `models_dir` must contain
/// `cornellbox/{floor,floor2,backwall,left,right}.obj` and `bunny/bunny2.obj`.
pub fn cornell_box(models_dir: &Path, width: usize, height: usize) -> Result<SceneSetup, ObjLoadError> {
    let red: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.63, 0.065, 0.05)));
    let green: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.14, 0.45, 0.091)));
    let white: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.725, 0.71, 0.68)));
    let blinn: Arc<dyn BSDF> = Arc::new(GlossyBSDF::new(RGBSpectrum::new(0.725, 0.71, 0.68), 4096.0));
    let light: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::emissive(RGBSpectrum::new(0.65, 0.65, 0.65),
                                                                        light_emission()));

    let box_dir = models_dir.join("cornellbox");
    let mut scene = Scene::new();
    scene.add(Arc::new(TriangleMesh::from_obj(box_dir.join("floor.obj"), white.clone())?));
    scene.add(Arc::new(TriangleMesh::from_obj(box_dir.join("floor2.obj"), blinn.clone())?));
    scene.add(Arc::new(TriangleMesh::from_obj(box_dir.join("backwall.obj"), blinn)?));
    scene.add(Arc::new(Sphere::new(Vector3f::new(300.0, 250.0, 150.0), 50.0, light)));
    scene.add(Arc::new(Sphere::new(Vector3f::new(200.0, 150.0, 150.0), 40.0, green.clone())));
    scene.add(Arc::new(TriangleMesh::from_obj(models_dir.join("bunny").join("bunny2.obj"), white)?));
    scene.add(Arc::new(TriangleMesh::from_obj(box_dir.join("left.obj"), red)?));
    scene.add(Arc::new(TriangleMesh::from_obj(box_dir.join("right.obj"), green)?));
    scene.build_bvh();

    Ok(SceneSetup { scene, camera: camera(width, height) })
}
