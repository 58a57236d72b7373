//! Cosine distance helpers.
//!
//! distance = 1 - cos(angle). A zero vector has no direction, so its
//! similarity to anything is taken as 0 (distance 1) instead of NaN.

/// Cosine distance from a dot product and the two norms
pub fn distance_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0)
}

/// Euclidean norm of a dense vector
pub fn norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

/// Cosine distance between two dense vectors of equal length
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    distance_from_parts(dot, norm(a), norm(b))
}
