use nalgebra::Point2;

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Polar angle of `p` around `center` in image coordinates, degrees in `[0, 360)`.
#[inline]
pub fn angle_deg(center: Point2<f64>, p: Point2<f64>) -> f64 {
    normalize_deg((p.y - center.y).atan2(p.x - center.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_wraps_negative_and_large_angles() {
        assert_abs_diff_eq!(normalize_deg(-90.0), 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_deg(720.0 + 45.0), 45.0, epsilon = 1e-12);
        assert_eq!(normalize_deg(-1e-20), 0.0);
    }

    #[test]
    fn angle_follows_image_axes() {
        let c = Point2::new(10.0, 10.0);
        assert_abs_diff_eq!(angle_deg(c, Point2::new(20.0, 10.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_deg(c, Point2::new(10.0, 20.0)), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_deg(c, Point2::new(10.0, 0.0)), 270.0, epsilon = 1e-12);
    }
}
