//! Geometry utilities shared by waypoint insertion and the cost terms.

use super::Point3;

/// Check whether `query` lies strictly inside the sphere whose diameter is the
/// segment `start`–`end`.
///
/// This is the containment test used to decide whether a new waypoint splits
/// an existing pair: a point "between" two waypoints sees them at an angle
/// wider than 90°.
///
/// # Example
/// ```
/// use rekha::core::{Point3, math::in_circle};
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(10.0, 0.0, 0.0);
/// assert!(in_circle(&a, &b, &Point3::new(5.0, 1.0, 0.0)));
/// assert!(!in_circle(&a, &b, &Point3::new(5.0, 6.0, 0.0)));
/// ```
#[inline]
pub fn in_circle(start: &Point3, end: &Point3, query: &Point3) -> bool {
    let center = start.midpoint(end);
    let radius_sq = start.distance_squared(end) * 0.25;
    query.distance_squared(&center) < radius_sq
}

/// Compute the centroid of a set of points.
#[inline]
pub fn compute_centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::ZERO;
    }

    let n = points.len() as f32;
    let sum = points.iter().fold(Point3::ZERO, |acc, p| acc + *p);
    sum * (1.0 / n)
}

/// Covariance matrix elements for 3D point sets (symmetric 3x3).
///
/// ```text
/// | cxx  cxy  cxz |
/// | cxy  cyy  cyz |
/// | cxz  cyz  czz |
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Covariance3D {
    pub cxx: f64,
    pub cyy: f64,
    pub czz: f64,
    pub cxy: f64,
    pub cxz: f64,
    pub cyz: f64,
}

/// Compute the (unnormalized) covariance of a point set around its centroid.
pub fn compute_covariance(points: &[Point3], centroid: Point3) -> Covariance3D {
    let mut cov = Covariance3D::default();

    for p in points {
        let dx = (p.x - centroid.x) as f64;
        let dy = (p.y - centroid.y) as f64;
        let dz = (p.z - centroid.z) as f64;
        cov.cxx += dx * dx;
        cov.cyy += dy * dy;
        cov.czz += dz * dz;
        cov.cxy += dx * dy;
        cov.cxz += dx * dz;
        cov.cyz += dy * dz;
    }

    cov
}

/// Eigenvalues of a symmetric 3x3 matrix, ascending.
///
/// Closed-form trigonometric solution; exact for diagonal input.
pub fn symmetric_eigenvalues(cov: &Covariance3D) -> [f64; 3] {
    let p1 = cov.cxy * cov.cxy + cov.cxz * cov.cxz + cov.cyz * cov.cyz;

    if p1 <= f64::EPSILON * (cov.cxx.abs() + cov.cyy.abs() + cov.czz.abs()).max(1.0) {
        let mut diag = [cov.cxx, cov.cyy, cov.czz];
        diag.sort_by(|a, b| a.total_cmp(b));
        return diag;
    }

    let q = (cov.cxx + cov.cyy + cov.czz) / 3.0;
    let p2 = (cov.cxx - q).powi(2) + (cov.cyy - q).powi(2) + (cov.czz - q).powi(2) + 2.0 * p1;
    let p = (p2 / 6.0).sqrt();

    // B = (A - qI) / p
    let b11 = (cov.cxx - q) / p;
    let b22 = (cov.cyy - q) / p;
    let b33 = (cov.czz - q) / p;
    let b12 = cov.cxy / p;
    let b13 = cov.cxz / p;
    let b23 = cov.cyz / p;

    let det_b = b11 * (b22 * b33 - b23 * b23) - b12 * (b12 * b33 - b23 * b13)
        + b13 * (b12 * b23 - b22 * b13);
    let r = (det_b / 2.0).clamp(-1.0, 1.0);
    let phi = r.acos() / 3.0;

    let largest = q + 2.0 * p * phi.cos();
    let smallest = q + 2.0 * p * (phi + 2.0 * std::f64::consts::PI / 3.0).cos();
    let middle = 3.0 * q - largest - smallest;

    [smallest, middle, largest]
}

/// Surface variation `λmin / (λ0 + λ1 + λ2)` of a neighbourhood, in [0, 1/3].
///
/// Zero on a plane, 1/3 for isotropic scatter. Returns `None` for fewer than
/// three points or a degenerate (coincident) neighbourhood.
pub fn surface_variation(points: &[Point3]) -> Option<f32> {
    if points.len() < 3 {
        return None;
    }

    let centroid = compute_centroid(points);
    let eig = symmetric_eigenvalues(&compute_covariance(points, centroid));
    let sum: f64 = eig.iter().map(|v| v.max(0.0)).sum();
    if sum <= f64::EPSILON {
        return None;
    }

    Some((eig[0].max(0.0) / sum) as f32)
}
