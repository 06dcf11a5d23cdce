//! Star extraction by connected-component thresholding.

use crate::{InputError, Raster, Star};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Parameters of the threshold/flood-fill extractor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionParams {
    /// Minimum intensity for a pixel to belong to a star, in raster units
    /// (0..255 for 8-bit views, 0..1 for normalized views).
    pub brightness_threshold: f32,
    /// Minimum number of connected bright pixels to report a star.
    pub min_cluster_size: usize,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            brightness_threshold: 200.0,
            min_cluster_size: 3,
        }
    }
}

const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Detect stars in a brightness raster.
///
/// Pixels are scanned in raster order. Each unvisited bright pixel seeds an
/// 8-connected flood fill; clusters with at least `min_cluster_size` pixels
/// become a [`Star`] at the pixel centroid, with mean brightness and the
/// largest pixel-to-centroid distance as radius. Zero-radius clusters are
/// dropped.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(raster, params),
        fields(width = raster.width(), height = raster.height())
    )
)]
pub fn extract_stars<R: Raster + ?Sized>(
    raster: &R,
    params: &ExtractionParams,
) -> Result<Vec<Star>, InputError> {
    raster.validate()?;
    if raster.is_empty() {
        return Ok(Vec::new());
    }

    let width = raster.width();
    let height = raster.height();
    let threshold = params.brightness_threshold;

    let mut visited = vec![false; width * height];
    let mut stack = Vec::new();
    let mut cluster = Vec::new();
    let mut stars = Vec::new();
    let mut rejected = 0usize;

    for y in 0..height {
        for x in 0..width {
            if visited[y * width + x] || raster.value(x, y) < threshold {
                continue;
            }

            flood_fill(raster, (x, y), threshold, &mut visited, &mut stack, &mut cluster);
            if cluster.len() < params.min_cluster_size {
                rejected += 1;
                continue;
            }
            match measure_cluster(raster, &cluster) {
                Some(star) => stars.push(star),
                None => rejected += 1,
            }
        }
    }

    log::debug!(
        "extracted {} stars from {}x{} raster ({} clusters rejected)",
        stars.len(),
        width,
        height,
        rejected
    );
    Ok(stars)
}

/// Collect the bright 8-connected region around `seed` into `cluster`.
///
/// Every popped pixel is marked visited, dim ones included, so the outer
/// scan never revisits them.
fn flood_fill<R: Raster + ?Sized>(
    raster: &R,
    seed: (usize, usize),
    threshold: f32,
    visited: &mut [bool],
    stack: &mut Vec<(usize, usize)>,
    cluster: &mut Vec<(usize, usize)>,
) {
    let width = raster.width();
    let height = raster.height();

    cluster.clear();
    stack.clear();
    stack.push(seed);

    while let Some((cx, cy)) = stack.pop() {
        let idx = cy * width + cx;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        if raster.value(cx, cy) < threshold {
            continue;
        }
        cluster.push((cx, cy));

        for (dx, dy) in NEIGHBORS_8 {
            let nx = cx as i64 + dx;
            let ny = cy as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if !visited[ny * width + nx] {
                stack.push((nx, ny));
            }
        }
    }
}

fn measure_cluster<R: Raster + ?Sized>(raster: &R, cluster: &[(usize, usize)]) -> Option<Star> {
    if cluster.is_empty() {
        return None;
    }
    let n = cluster.len() as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_b = 0.0;
    for &(x, y) in cluster {
        sum_x += x as f64;
        sum_y += y as f64;
        sum_b += raster.value(x, y) as f64;
    }
    let cx = sum_x / n;
    let cy = sum_y / n;

    let radius = cluster
        .iter()
        .map(|&(x, y)| (x as f64 - cx).hypot(y as f64 - cy))
        .fold(0.0_f64, f64::max);
    if radius == 0.0 {
        return None;
    }

    Some(Star::new(cx, cy, sum_b / n, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GrayImage, GrayImageView, LumaImageView};
    use approx::assert_relative_eq;

    fn blob(img: &mut GrayImage, cx: i64, cy: i64, value: u8) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                img.put(cx + dx, cy + dy, value);
            }
        }
    }

    #[test]
    fn empty_raster_yields_no_stars() {
        let img = GrayImage::new(0, 0);
        let stars = extract_stars(&img, &ExtractionParams::default()).expect("extract");
        assert!(stars.is_empty());
    }

    #[test]
    fn corrupt_buffer_is_an_input_error() {
        let data = [255u8; 3];
        let view = GrayImageView {
            width: 2,
            height: 2,
            data: &data,
        };
        let res = extract_stars(&view, &ExtractionParams::default());
        assert!(matches!(res, Err(InputError::BufferSize { .. })));
    }

    #[test]
    fn finds_blob_centroids_in_raster_order() {
        let mut img = GrayImage::new(40, 30);
        blob(&mut img, 30, 5, 250);
        blob(&mut img, 10, 20, 220);

        let stars = extract_stars(&img, &ExtractionParams::default()).expect("extract");
        assert_eq!(2, stars.len());
        assert_relative_eq!(stars[0].x(), 30.0);
        assert_relative_eq!(stars[0].y(), 5.0);
        assert_relative_eq!(stars[0].brightness, 250.0);
        assert_relative_eq!(stars[0].radius, 2.0_f64.sqrt());
        assert_relative_eq!(stars[1].x(), 10.0);
        assert_relative_eq!(stars[1].y(), 20.0);
    }

    #[test]
    fn diagonal_pixels_join_one_cluster() {
        let mut img = GrayImage::new(10, 10);
        img.put(2, 2, 255);
        img.put(3, 3, 255);
        img.put(4, 4, 255);

        let stars = extract_stars(&img, &ExtractionParams::default()).expect("extract");
        assert_eq!(1, stars.len());
        assert_relative_eq!(stars[0].x(), 3.0);
        assert_relative_eq!(stars[0].y(), 3.0);
    }

    #[test]
    fn small_and_single_pixel_clusters_are_dropped() {
        let mut img = GrayImage::new(10, 10);
        img.put(1, 1, 255);
        img.put(5, 5, 255);
        img.put(6, 5, 255);

        let stars = extract_stars(&img, &ExtractionParams::default()).expect("extract");
        assert!(stars.is_empty());

        let params = ExtractionParams {
            min_cluster_size: 1,
            ..ExtractionParams::default()
        };
        let stars = extract_stars(&img, &params).expect("extract");
        // The lone pixel has zero radius; the pair survives.
        assert_eq!(1, stars.len());
        assert_relative_eq!(stars[0].x(), 5.5);
        assert_relative_eq!(stars[0].radius, 0.5);
    }

    #[test]
    fn normalized_rasters_use_the_same_threshold_rule() {
        let mut data = vec![0.0f32; 25];
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            data[y * 5 + x] = 0.9;
        }
        let view = LumaImageView {
            width: 5,
            height: 5,
            data: &data,
        };
        let params = ExtractionParams {
            brightness_threshold: 0.5,
            min_cluster_size: 3,
        };
        let stars = extract_stars(&view, &params).expect("extract");
        assert_eq!(1, stars.len());
        assert_relative_eq!(stars[0].x(), 1.5);
        assert_relative_eq!(stars[0].brightness, 0.9, epsilon = 1e-6);
    }
}
