// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

/// Linear RGB radiance triple.
pub type RGBSpectrum = Vector3f;

pub trait Spectrum {
    fn is_black(&self) -> bool;
    fn max_component(&self) -> Float;
    fn luminance(&self) -> Float;
    fn is_valid(&self) -> bool;
}

impl Spectrum for RGBSpectrum {
    fn is_black(&self) -> bool {
        self.iter().all(|c| *c == 0.0)
    }

    fn max_component(&self) -> Float {
        self.x.max(self.y).max(self.z)
    }

    fn luminance(&self) -> Float {
        0.2126 * self.x + 0.7152 * self.y + 0.0722 * self.z
    }

    fn is_valid(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}
