/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;
pub type Int = i32;
pub type UInt = u32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
// Floor below which a sampling density is treated as degenerate.
pub const PDF_EPSILON: Float = 1e-5;
pub const PI: Float = 3.14159265359;
pub const INV_PI: Float = 0.31830988618;
pub const INV_2PI: Float = 0.15915494309;
pub const INV_4PI: Float = 0.07957747154;

pub const FLOAT_MAX: Float = std::f32::MAX;
pub const FLOAT_MIN: Float = std::f32::MIN;
pub const FLOAT_INF: Float = std::f32::INFINITY;
