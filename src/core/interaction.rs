// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::shape::Shape;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// A point on a surface found by a ray query or drawn by surface sampling.
///
/// The record borrows the material and the primitive that produced it, so it
/// cannot outlive the scene it was queried from.
#[derive(Clone, Copy)]
pub struct SurfaceIntersection<'a> {
    p: Vector3f,
    normal: Vector3f,
    t: Float,
    le: RGBSpectrum,
    material: &'a dyn BSDF,
    shape: &'a dyn Shape,
}

pub struct SurfaceSampleRecord<'a> {
    intersection: SurfaceIntersection<'a>,
    pdf: Float,
}

impl<'a> SurfaceIntersection<'a> {
    /// Emission is taken from the material.
    pub fn new(p: Vector3f,
               normal: Vector3f,
               t: Float,
               material: &'a dyn BSDF,
               shape: &'a dyn Shape) -> Self {
        Self { p, normal, t, le: material.emission(), material, shape }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn le(&self) -> RGBSpectrum {
        self.le
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn material(&self) -> &'a dyn BSDF {
        self.material
    }

    pub fn shape(&self) -> &'a dyn Shape {
        self.shape
    }

    pub fn is_emissive(&self) -> bool {
        self.material.has_emission()
    }
}

impl<'a> SurfaceSampleRecord<'a> {
    pub fn new(intersection: SurfaceIntersection<'a>,
               pdf: Float) -> Self {
        Self { intersection, pdf }
    }

    pub fn intersection(&self) -> &SurfaceIntersection<'a> {
        &self.intersection
    }

    pub fn pdf(&self) -> Float {
        self.pdf
    }

    pub fn set_pdf(&mut self, pdf: Float) {
        self.pdf = pdf;
    }
}
