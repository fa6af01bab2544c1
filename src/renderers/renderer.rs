// Copyright @yucwang 2021

use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    /// Renders `scene` and returns the averaged radiance estimate.
    fn render(&mut self, scene: &Scene) -> Bitmap;
}
