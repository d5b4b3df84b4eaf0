use super::core::RGBAIm;
use image::ImageResult;
use std::path::Path;

fn dim_mismatch_err() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

// PNG I/O
// -----------------------------------------------------------------------------
impl RGBAIm {
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        // Repack in case the stride carries padding.
        let mut packed = Vec::with_capacity(self.w * self.h * 4);
        for y in 0..self.h {
            let row = y * self.s;
            packed.extend_from_slice(&self.arr[row..row + self.w * 4]);
        }

        let img = image::RgbaImage::from_raw(self.w as u32, self.h as u32, packed)
            .ok_or_else(dim_mismatch_err)?;

        img.save_with_format(path, image::ImageFormat::Png)
    }
}

// Tests
// -----------------------------------------------------------------------------
