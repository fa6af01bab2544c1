// Copyright @yucwang 2021

pub mod glossy;
pub mod lambertian_diffuse;
