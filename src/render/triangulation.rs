//! Delaunay triangulation of scattered (strike, ttm) sites
//!
//! Bowyer-Watson insertion. Sites are rescaled to the unit box first so that
//! strikes (hundreds) and year fractions (hundredths) weigh the same in the
//! empty-circumcircle test.

use std::collections::{HashMap, HashSet};

use crate::core::{SurfaceError, SurfaceResult};

/// Sine of the vertex angle below which a triangle counts as flat
const FLAT_SINE: f64 = 1e-10;

#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
    cx: f64,
    cy: f64,
    r2: f64,
}

impl Triangle {
    fn new(v: [usize; 3], pts: &[(f64, f64)]) -> Self {
        let (ax, ay) = pts[v[0]];
        let (bx, by) = pts[v[1]];
        let (cx, cy) = pts[v[2]];

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        let ab = (bx - ax).hypot(by - ay);
        let ac = (cx - ax).hypot(cy - ay);
        if d.abs() <= 2.0 * FLAT_SINE * ab * ac {
            // Flat; every later site lands inside so it gets replaced
            return Self { v, cx: ax, cy: ay, r2: f64::INFINITY };
        }

        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;

        Self {
            v,
            cx: ux,
            cy: uy,
            r2: (ax - ux).powi(2) + (ay - uy).powi(2),
        }
    }

    fn circumcircle_contains(&self, (x, y): (f64, f64)) -> bool {
        (x - self.cx).powi(2) + (y - self.cy).powi(2) < self.r2
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

/// Triangulate the sites `(xs[i], ys[i])`.
///
/// Returned triangles index into the input slices. Repeated sites are only
/// used at their first occurrence. Fails with `Degenerate` when fewer than
/// three distinct sites exist or all of them are collinear.
pub fn delaunay(xs: &[f64], ys: &[f64]) -> SurfaceResult<Vec<[usize; 3]>> {
    if xs.len() != ys.len() {
        return Err(SurfaceError::invalid_input(format!(
            "coordinate length mismatch: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if let Some(i) = xs.iter().chain(ys).position(|v| !v.is_finite()) {
        return Err(SurfaceError::invalid_input(format!(
            "non-finite coordinate at position {}",
            i % xs.len().max(1)
        )));
    }

    // Distinct sites, remembering their input index
    let mut seen = HashSet::new();
    let origin: Vec<usize> = (0..xs.len())
        .filter(|&i| seen.insert((xs[i].to_bits(), ys[i].to_bits())))
        .collect();

    if origin.len() < 3 {
        return Err(SurfaceError::degenerate(format!(
            "need at least 3 distinct points, got {}",
            origin.len()
        )));
    }

    let (x_lo, x_span) = bounds(origin.iter().map(|&i| xs[i]));
    let (y_lo, y_span) = bounds(origin.iter().map(|&i| ys[i]));

    let mut pts: Vec<(f64, f64)> = origin
        .iter()
        .map(|&i| ((xs[i] - x_lo) / x_span, (ys[i] - y_lo) / y_span))
        .collect();

    // Super triangle enclosing the unit box
    let n = pts.len();
    pts.extend([(-19.5, -0.5), (0.5, 20.5), (20.5, -0.5)]);
    let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &pts)];

    for k in 0..n {
        let p = pts[k];
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) =
            triangles.into_iter().partition(|t| t.circumcircle_contains(p));

        // Cavity boundary: edges of exactly one bad triangle
        let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
        for t in &bad {
            for (a, b) in t.edges() {
                *counts.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }

        triangles = good;
        for t in &bad {
            for (a, b) in t.edges() {
                if counts[&(a.min(b), a.max(b))] == 1 {
                    triangles.push(Triangle::new([a, b, k], &pts));
                }
            }
        }
    }

    let result: Vec<[usize; 3]> = triangles
        .iter()
        .filter(|t| t.v.iter().all(|&v| v < n))
        .filter(|t| t.r2.is_finite())
        .map(|t| t.v.map(|v| origin[v]))
        .collect();

    if result.is_empty() {
        return Err(SurfaceError::degenerate("all points are collinear"));
    }

    Ok(result)
}

/// Lower bound and span; a zero span becomes 1 so rescaling stays finite
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;
    (lo, if span > 0.0 { span } else { 1.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(xs: &[f64], ys: &[f64], t: &[usize; 3]) -> f64 {
        let [a, b, c] = *t;
        0.5 * ((xs[b] - xs[a]) * (ys[c] - ys[a]) - (xs[c] - xs[a]) * (ys[b] - ys[a])).abs()
    }

    #[test]
    fn test_single_triangle() {
        let tris = delaunay(&[100.0, 110.0, 105.0], &[0.01, 0.01, 0.05]).unwrap();
        assert_eq!(tris.len(), 1);

        let mut v = tris[0].to_vec();
        v.sort();
        assert_eq!(v, vec![0, 1, 2]);
    }

    #[test]
    fn test_grid_covers_hull() {
        // 3 strikes x 3 expiries
        let strikes = [100.0, 105.0, 110.0];
        let ttms = [0.01, 0.03, 0.05];
        let (mut xs, mut ys) = (Vec::new(), Vec::new());
        for &t in &ttms {
            for &k in &strikes {
                xs.push(k);
                ys.push(t);
            }
        }

        let tris = delaunay(&xs, &ys).unwrap();

        // 2n - 2 - h with all 8 border points on the hull
        assert_eq!(tris.len(), 8);
        let total: f64 = tris.iter().map(|t| area(&xs, &ys, t)).sum();
        assert!((total - 10.0 * 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_empty_circumcircle_property() {
        // Deterministic scatter
        let mut state = 12345u64;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        let xs: Vec<f64> = (0..60).map(|_| 150.0 + 100.0 * next()).collect();
        let ys: Vec<f64> = (0..60).map(|_| 0.2 * next()).collect();

        let tris = delaunay(&xs, &ys).unwrap();
        assert!(!tris.is_empty());

        let (x_lo, x_span) = bounds(xs.iter().copied());
        let (y_lo, y_span) = bounds(ys.iter().copied());
        let nx: Vec<(f64, f64)> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| ((x - x_lo) / x_span, (y - y_lo) / y_span))
            .collect();

        for t in &tris {
            let circle = Triangle::new(*t, &nx);
            for (i, &p) in nx.iter().enumerate() {
                if t.contains(&i) {
                    continue;
                }
                let d2 = (p.0 - circle.cx).powi(2) + (p.1 - circle.cy).powi(2);
                assert!(d2 >= circle.r2 * (1.0 - 1e-9), "site {} inside {:?}", i, t);
            }
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(matches!(delaunay(&[], &[]), Err(SurfaceError::Degenerate(_))));
        assert!(matches!(
            delaunay(&[1.0, 2.0], &[0.1, 0.2]),
            Err(SurfaceError::Degenerate(_))
        ));
        // One expiry only: every site shares the same ttm
        assert!(matches!(
            delaunay(&[100.0, 105.0, 110.0, 115.0], &[0.02; 4]),
            Err(SurfaceError::Degenerate(_))
        ));
        assert!(matches!(
            delaunay(&[1.0, 2.0], &[0.1]),
            Err(SurfaceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rounded_collinear_sites_are_degenerate() {
        // On one sloped line, but rescaling leaves rounding noise
        let xs = [100.0, 103.0, 107.0, 110.0, 113.3];
        let ys: Vec<f64> = xs.iter().map(|x| 0.01 + (x - 100.0) * 0.002).collect();

        assert!(matches!(delaunay(&xs, &ys), Err(SurfaceError::Degenerate(_))));
    }

    #[test]
    fn test_long_rows_cover_hull() {
        // 5 expiries x 80 strikes, interior strikes jittered per expiry
        let ttms = [0.02, 0.05, 0.1, 0.25, 0.5];
        let (mut xs, mut ys) = (Vec::new(), Vec::new());
        for (t, &ttm) in ttms.iter().enumerate() {
            for k in 0..80 {
                let jitter = if k == 0 || k == 79 {
                    0.0
                } else {
                    0.4 * ((k * (t + 1)) as f64).sin()
                };
                xs.push(100.0 + 1.25 * k as f64 + jitter);
                ys.push(ttm);
            }
        }

        let tris = delaunay(&xs, &ys).unwrap();

        let areas: Vec<f64> = tris.iter().map(|t| area(&xs, &ys, t)).collect();
        assert!(areas.iter().all(|&a| a > 0.0));

        let hull = (1.25 * 79.0) * (0.5 - 0.02);
        let total: f64 = areas.iter().sum();
        assert!((total - hull).abs() < 1e-9 * hull, "covered {} of {}", total, hull);
    }

    #[test]
    fn test_duplicates_use_first_occurrence() {
        let xs = [100.0, 110.0, 100.0, 105.0];
        let ys = [0.01, 0.01, 0.01, 0.05];

        let tris = delaunay(&xs, &ys).unwrap();
        assert_eq!(tris.len(), 1);
        assert!(!tris[0].contains(&2));
    }
}
