// Copyright @yucwang 2021

pub mod bsdf;
pub mod bvh;
pub mod integrator;
pub mod interaction;
pub mod sensor;
pub mod scene;
pub mod shape;
