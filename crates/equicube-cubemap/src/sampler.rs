//! Nearest-neighbor lookup of a view direction in an equirectangular image.
//!
//! Longitude `atan2(dx, dz)` spans the image width starting at −π on the left,
//! so `+Z` lands on the center column. Latitude `asin(dy)` spans the height with
//! `+Y` at the top row. Pixel coordinates are rounded to the nearest integer and
//! clamped into the image, never wrapped: the ±180° seam and the poles resolve
//! to the edge columns and rows.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;
use image::Rgb;

use crate::EquirectangularImage;

/// Longitude and latitude (radians) of a unit direction.
///
/// `dy` is clamped to `[-1, 1]` before `asin`, so slight floating-point
/// overshoot still yields ±π/2.
#[inline]
#[must_use]
pub fn direction_to_lon_lat(dir: DVec3) -> (f64, f64) {
    let lon = dir.x.atan2(dir.z);
    let lat = dir.y.clamp(-1.0, 1.0).asin();
    (lon, lat)
}

/// Pixel `(column, row)` of `dir` in a `width` × `height` equirectangular image.
///
/// The result always satisfies `column < width` and `row < height`.
/// `width` and `height` must be at least 1.
#[inline]
#[must_use]
pub fn direction_to_pixel(dir: DVec3, width: u32, height: u32) -> (u32, u32) {
    debug_assert!(width >= 1 && height >= 1, "empty image {width}x{height}");
    let (lon, lat) = direction_to_lon_lat(dir);

    let fx = (lon + PI) / (2.0 * PI) * f64::from(width);
    let fy = (1.0 - (lat + FRAC_PI_2) / PI) * f64::from(height);

    let px = fx.round().clamp(0.0, f64::from(width - 1));
    let py = fy.round().clamp(0.0, f64::from(height - 1));
    (px as u32, py as u32)
}

/// Color of the source pixel nearest to `dir`.
#[inline]
#[must_use]
pub fn sample(source: &EquirectangularImage, dir: DVec3) -> Rgb<u8> {
    let (px, py) = direction_to_pixel(dir, source.width(), source.height());
    source.pixel(px, py)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    const SIZES: [(u32, u32); 7] = [(1, 1), (2, 1), (4, 2), (5, 3), (7, 2), (64, 32), (1, 9)];

    fn sphere_directions() -> Vec<DVec3> {
        let mut dirs = vec![
            DVec3::Y,
            DVec3::NEG_Y,
            DVec3::X,
            DVec3::NEG_X,
            DVec3::Z,
            DVec3::NEG_Z,
            DVec3::new(-0.0, 0.0, -1.0),
            DVec3::new(1e-300, 0.0, -1.0),
            DVec3::new(-1e-300, 0.0, -1.0),
        ];
        for i in 0..=24 {
            let lat = -FRAC_PI_2 + PI * f64::from(i) / 24.0;
            for j in 0..48 {
                let lon = -PI + 2.0 * PI * f64::from(j) / 48.0;
                let (slat, clat) = lat.sin_cos();
                let (slon, clon) = lon.sin_cos();
                dirs.push(DVec3::new(clat * slon, slat, clat * clon));
            }
        }
        dirs
    }

    #[test]
    fn test_pixels_always_in_bounds() {
        for (w, h) in SIZES {
            for dir in sphere_directions() {
                let (px, py) = direction_to_pixel(dir, w, h);
                assert!(px < w && py < h, "{dir:?} -> ({px}, {py}) outside {w}x{h}");
            }
        }
    }

    #[test]
    fn test_front_center_hits_image_center() {
        for (w, h) in SIZES {
            let (px, py) = direction_to_pixel(DVec3::Z, w, h);
            let cx = (f64::from(w) / 2.0).round().min(f64::from(w - 1)) as u32;
            let cy = (f64::from(h) / 2.0).round().min(f64::from(h - 1)) as u32;
            assert_eq!((px, py), (cx, cy), "center of {w}x{h}");
        }
        assert_eq!(direction_to_pixel(DVec3::Z, 1024, 512), (512, 256));
    }

    #[test]
    fn test_front_center_lon_lat_zero() {
        let (lon, lat) = direction_to_lon_lat(DVec3::Z);
        assert_eq!(lon, 0.0);
        assert_eq!(lat, 0.0);
    }

    #[test]
    fn test_poles_clamp_to_edge_rows() {
        let (_, top) = direction_to_pixel(DVec3::Y, 16, 8);
        let (_, bottom) = direction_to_pixel(DVec3::NEG_Y, 16, 8);
        assert_eq!(top, 0);
        assert_eq!(bottom, 7);
    }

    #[test]
    fn test_seam_clamps_instead_of_wrapping() {
        // atan2(+0, -1) = π lands one past the last column; atan2(-0, -1) = -π lands on 0.
        assert_eq!(direction_to_pixel(DVec3::new(0.0, 0.0, -1.0), 16, 8), (15, 4));
        assert_eq!(direction_to_pixel(DVec3::new(-0.0, 0.0, -1.0), 16, 8), (0, 4));
    }

    #[test]
    fn test_overshooting_dy_does_not_fail() {
        let (lon, lat) = direction_to_lon_lat(DVec3::new(0.0, 1.000_000_1, 0.0));
        assert_eq!(lat, FRAC_PI_2);
        assert!(lon.is_finite());
        let (_, py) = direction_to_pixel(DVec3::new(0.0, -1.000_000_1, 0.0), 8, 4);
        assert_eq!(py, 3);
    }

    #[test]
    fn test_quarter_longitudes() {
        // +X is a quarter turn east of +Z, -X a quarter turn west.
        assert_eq!(direction_to_pixel(DVec3::X, 8, 4), (6, 2));
        assert_eq!(direction_to_pixel(DVec3::NEG_X, 8, 4), (2, 2));
    }

    #[test]
    fn test_sample_reads_nearest_pixel() {
        let img = RgbImage::from_fn(8, 4, |x, y| Rgb([x as u8, y as u8, 0]));
        let source = EquirectangularImage::new(img).unwrap();
        assert_eq!(sample(&source, DVec3::Z), Rgb([4, 2, 0]));
        assert_eq!(sample(&source, DVec3::Y), Rgb([4, 0, 0]));
        assert_eq!(sample(&source, DVec3::NEG_X), Rgb([2, 2, 0]));
    }
}
