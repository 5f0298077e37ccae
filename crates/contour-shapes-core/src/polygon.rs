//! Polygon measures over integer point rings.
//!
//! All functions treat the input as a closed ring (the last point connects
//! back to the first) unless stated otherwise.

use nalgebra::Point2;

use crate::contour::{distance, to_f64};

// i128 keeps products of full-range i32 differences exact.
#[inline]
fn cross(a: Point2<i32>, b: Point2<i32>) -> i128 {
    a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128
}

#[inline]
fn ring_edges(points: &[Point2<i32>]) -> impl Iterator<Item = (Point2<i32>, Point2<i32>)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Shoelace area with sign (positive for counter-clockwise in math axes).
pub fn signed_area(points: &[Point2<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i128 = ring_edges(points).map(|(a, b)| cross(a, b)).sum();
    twice as f64 * 0.5
}

/// Enclosed area of a ring, always non-negative.
pub fn polygon_area(points: &[Point2<i32>]) -> f64 {
    signed_area(points).abs()
}

/// Area-weighted centroid from the first-order moments of the ring.
///
/// Falls back to the origin when the zeroth moment vanishes.
pub fn centroid(points: &[Point2<i32>]) -> Point2<f64> {
    let m00 = signed_area(points);
    if m00 == 0.0 {
        return Point2::origin();
    }
    let (mut m10, mut m01) = (0.0f64, 0.0f64);
    for (a, b) in ring_edges(points) {
        let c = cross(a, b) as f64;
        m10 += (a.x as f64 + b.x as f64) * c;
        m01 += (a.y as f64 + b.y as f64) * c;
    }
    Point2::new(m10 / (6.0 * m00), m01 / (6.0 * m00))
}

/// Convex hull by Andrew's monotone chain.
///
/// Returns hull vertices without repetition. Inputs with fewer than three
/// distinct points are returned deduplicated.
pub fn convex_hull(points: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let turn = |o: Point2<i32>, a: Point2<i32>, b: Point2<i32>| -> i128 {
        let (ax, ay) = (a.x as i128 - o.x as i128, a.y as i128 - o.y as i128);
        let (bx, by) = (b.x as i128 - o.x as i128, b.y as i128 - o.y as i128);
        ax * by - ay * bx
    };

    let mut hull: Vec<Point2<i32>> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

fn segment_distance(p: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> f64 {
    let (p, a, b) = (to_f64(p), to_f64(a), to_f64(b));
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Ramer–Douglas–Peucker simplification of an open polyline.
///
/// Both endpoints are always kept. Points farther than `epsilon` from the
/// current chord are retained.
pub fn simplify_open(points: &[Point2<i32>], epsilon: f64) -> Vec<Point2<i32>> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut best = (start, 0.0f64);
        for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = segment_distance(p, points[start], points[end]);
            if d > best.1 {
                best = (i, d);
            }
        }
        if best.1 > epsilon {
            keep[best.0] = true;
            stack.push((start, best.0));
            stack.push((best.0, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn farthest_from(points: &[Point2<i32>], from: Point2<i32>) -> (usize, f64) {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| (i, distance(from, p)))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best })
}

/// Ramer–Douglas–Peucker simplification of a closed ring.
///
/// The ring is split at two mutually distant extreme points, both halves are
/// simplified as open polylines and stitched back together. A duplicated
/// closing point is ignored.
pub fn simplify_closed(points: &[Point2<i32>], epsilon: f64) -> Vec<Point2<i32>> {
    let ring = match points {
        [first, .., last] if points.len() > 1 && first == last => &points[..points.len() - 1],
        _ => points,
    };
    if ring.len() < 3 {
        return ring.to_vec();
    }

    let (a, _) = farthest_from(ring, ring[0]);
    let (b, span) = farthest_from(ring, ring[a]);
    if span == 0.0 {
        return vec![ring[0]];
    }

    let n = ring.len();
    let cyclic = |from: usize, to: usize| -> Vec<Point2<i32>> {
        let len = (to + n - from) % n;
        (0..=len).map(|k| ring[(from + k) % n]).collect()
    };

    let first_half = simplify_open(&cyclic(a, b), epsilon);
    let second_half = simplify_open(&cyclic(b, a), epsilon);

    let mut out = first_half;
    out.extend_from_slice(&second_half[1..second_half.len() - 1]);
    out
}
