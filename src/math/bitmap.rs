// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f };

use std::ops;
use std::vec::Vec;

#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, index: (usize, usize)) -> &Vector3f {
        assert!(index.0 < self.width && index.1 < self.height);
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector3f {
        assert!(index.0 < self.width && index.1 < self.height);
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { data: vec![Vector3f::zeros(); width * height],
               width,
               height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Vector3f] {
        &self.data
    }

    /// Mutable view of rows `[y0, y0 + rows)`.
    pub fn rows_mut(&mut self, y0: usize, rows: usize) -> &mut [Vector3f] {
        let start = y0 * self.width;
        let end = ((y0 + rows) * self.width).min(self.data.len());
        &mut self.data[start..end]
    }

    /// Adds `band` onto the rows starting at `y0`.
    pub fn accumulate_rows(&mut self, y0: usize, band: &[Vector3f]) {
        let rows = band.len() / self.width.max(1);
        for (dst, src) in self.rows_mut(y0, rows).iter_mut().zip(band) {
            *dst += src;
        }
    }

    pub fn scaled(&self, factor: Float) -> Bitmap {
        Bitmap {
            data: self.data.iter().map(|p| p * factor).collect(),
            width: self.width,
            height: self.height,
        }
    }

    pub fn clear(&mut self) {
        for p in self.data.iter_mut() {
            *p = Vector3f::zeros();
        }
    }
}

/* Test for Bitmap */
#[cfg(test)]
mod tests {
    use super::Bitmap;
    use super::Vector3f;

    #[test]
    fn test_bitmap_basic_functions() {
        let mut bitmap = Bitmap::new(256usize, 256usize);
        assert_eq!(bitmap.width(), 256);
        assert_eq!(bitmap.height(), 256);

        bitmap[(5, 6)] = Vector3f::new(1.0, 0.5, 0.6);
        assert_eq!(bitmap[(5, 6)].x, 1.0);
        assert_eq!(bitmap[(2, 6)].x, 0.0);
        assert_eq!(bitmap.pixels()[5 + 256 * 6], Vector3f::new(1.0, 0.5, 0.6));
    }

    #[test]
    fn test_bitmap_accumulate_and_scale() {
        let mut bitmap = Bitmap::new(2, 3);
        let band = vec![Vector3f::new(1.0, 1.0, 1.0); 4];
        bitmap.accumulate_rows(1, &band);
        bitmap.accumulate_rows(1, &band);
        assert_eq!(bitmap[(0, 0)], Vector3f::zeros());
        assert_eq!(bitmap[(1, 2)], Vector3f::new(2.0, 2.0, 2.0));

        let half = bitmap.scaled(0.5);
        assert_eq!(half[(0, 1)], Vector3f::new(1.0, 1.0, 1.0));

        bitmap.clear();
        assert_eq!(bitmap[(1, 2)], Vector3f::zeros());
    }
}
