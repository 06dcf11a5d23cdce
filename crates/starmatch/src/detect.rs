//! End-to-end helpers working on `image` buffers and files.

use crate::core::{GrayImageView, InputError};
use crate::pattern::{
    MatchError, StarMatchConfig, StarMatchParams, StarMatchReport, StarMatchResult, StarMatcher,
};
use ::image::ImageReader;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Borrow an `image::GrayImage` as a `starmatch-core` raster view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a raw 8-bit buffer into an `image::GrayImage`, checking its size.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, InputError> {
    let dims = InputError::Dimensions {
        width: width as usize,
        height: height as usize,
    };
    let Some(expected) = (width as usize).checked_mul(height as usize) else {
        return Err(dims);
    };
    if pixels.len() != expected {
        return Err(InputError::BufferSize {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec()).ok_or(dims)
}

/// Decode an image file into 8-bit luma. Color images are converted.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, InputError> {
    let path = path.as_ref();
    let load_error = |reason: String| InputError::Load {
        path: path.display().to_string(),
        reason,
    };
    let img = ImageReader::open(path)
        .map_err(|e| load_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| load_error(e.to_string()))?
        .decode()
        .map_err(|e| load_error(e.to_string()))?;
    Ok(img.to_luma8())
}

/// Match the stars of two decoded images.
pub fn match_images(
    img_a: &::image::GrayImage,
    img_b: &::image::GrayImage,
    params: StarMatchParams,
) -> Result<StarMatchResult, MatchError> {
    StarMatcher::new(params).match_rasters(&gray_view(img_a), &gray_view(img_b))
}

/// Load two image files and match their stars.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(path_a, path_b, params))
)]
pub fn match_files(
    path_a: impl AsRef<Path>,
    path_b: impl AsRef<Path>,
    params: StarMatchParams,
) -> Result<StarMatchResult, MatchError> {
    let img_a = load_gray(path_a)?;
    let img_b = load_gray(path_b)?;
    match_images(&img_a, &img_b, params)
}

/// Run the matching described by `cfg` and collect the outcome in a report.
///
/// Failures are recorded in the report rather than returned.
pub fn run_config(cfg: &StarMatchConfig, config_path: &Path) -> StarMatchReport {
    let mut report = StarMatchReport::new(cfg, config_path);
    match match_files(&cfg.image_a, &cfg.image_b, cfg.params) {
        Ok(result) => {
            if !result.is_match() {
                log::warn!("no match between {} and {}", cfg.image_a, cfg.image_b);
            }
            report.set_result(result);
        }
        Err(err) => {
            log::error!("matching failed: {err}");
            report.set_error(err);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::MatchParams;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn field(shift: (u32, u32)) -> ::image::GrayImage {
        let centers = [(12, 10), (45, 14), (30, 35), (60, 40), (18, 55), (50, 62)];
        let mut img = ::image::GrayImage::new(90, 80);
        for (x, y) in centers {
            for dy in 0..3 {
                for dx in 0..3 {
                    img.put_pixel(x + shift.0 + dx, y + shift.1 + dy, ::image::Luma([240]));
                }
            }
        }
        img
    }

    fn params() -> StarMatchParams {
        StarMatchParams {
            matching: MatchParams {
                min_matches: 2,
                ..MatchParams::default()
            },
            ..StarMatchParams::default()
        }
    }

    #[test]
    fn gray_image_from_slice_checks_length() {
        assert!(matches!(
            gray_image_from_slice(3, 3, &[0; 8]),
            Err(InputError::BufferSize {
                expected: 9,
                got: 8
            })
        ));
        let img = gray_image_from_slice(2, 1, &[1, 2]).expect("image");
        assert_eq!(2, gray_view(&img).data[1]);
    }

    #[test]
    fn matches_files_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path_a = dir.path().join("a.png");
        let path_b = dir.path().join("b.png");
        field((0, 0)).save(&path_a).expect("save a");
        field((5, 3)).save(&path_b).expect("save b");

        let result = match_files(&path_a, &path_b, params()).expect("match");
        let t = result.transform.expect("transform");
        assert_relative_eq!(t.translation, Vector2::new(5.0, 3.0), epsilon = 1e-9);
        assert_eq!(6, result.correspondences.len());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.png");
        let err = match_files(&missing, &missing, params()).unwrap_err();
        assert!(matches!(err, MatchError::Input(InputError::Load { .. })));

        let cfg = StarMatchConfig {
            image_a: missing.to_string_lossy().into_owned(),
            image_b: missing.to_string_lossy().into_owned(),
            output_path: None,
            params: params(),
        };
        let report = run_config(&cfg, &dir.path().join("cfg.json"));
        assert!(report.error.is_some());
        assert!(report.transform.is_none());
    }
}
