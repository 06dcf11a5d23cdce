use crate::InputError;

/// Single-channel brightness raster, row-major.
///
/// Implemented for 8-bit views and normalized floating point views so both
/// encodings feed the same extractor.
pub trait Raster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Intensity at `(x, y)`. Callers keep `x < width` and `y < height`.
    fn value(&self, x: usize, y: usize) -> f32;

    /// Length of the backing buffer.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check that the buffer length agrees with the declared dimensions.
    fn validate(&self) -> Result<(), InputError> {
        let (width, height) = (self.width(), self.height());
        let expected = width
            .checked_mul(height)
            .ok_or(InputError::Dimensions { width, height })?;
        if self.len() != expected {
            return Err(InputError::BufferSize {
                expected,
                got: self.len(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Set a pixel, ignoring coordinates outside the image.
    pub fn put(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.data[y as usize * self.width + x as usize] = value;
    }
}

/// Normalized intensity view (values nominally in `[0, 1]`).
#[derive(Clone, Copy, Debug)]
pub struct LumaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [f32],
}

impl Raster for GrayImageView<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn value(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x] as f32
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl Raster for GrayImage {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn value(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x] as f32
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl Raster for LumaImageView<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn value(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_short_buffer() {
        let data = [0u8; 5];
        let view = GrayImageView {
            width: 3,
            height: 2,
            data: &data,
        };
        assert!(matches!(
            view.validate(),
            Err(InputError::BufferSize {
                expected: 6,
                got: 5
            })
        ));
    }

    #[test]
    fn validate_rejects_overflowing_dimensions() {
        let view = LumaImageView {
            width: usize::MAX,
            height: 2,
            data: &[],
        };
        assert!(matches!(
            view.validate(),
            Err(InputError::Dimensions { .. })
        ));
    }

    #[test]
    fn empty_raster_is_valid() {
        let img = GrayImage::new(0, 0);
        assert!(img.validate().is_ok());
        assert!(img.is_empty());
    }

    #[test]
    fn put_ignores_out_of_bounds() {
        let mut img = GrayImage::new(2, 2);
        img.put(-1, 0, 255);
        img.put(2, 1, 255);
        img.put(1, 1, 7);
        assert_eq!(img.data, vec![0, 0, 0, 7]);
        assert_eq!(img.view().value(1, 1), 7.0);
    }
}
