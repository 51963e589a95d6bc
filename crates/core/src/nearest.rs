//! Nearest-landmark search in mesh-local space.

use crate::landmark::Landmark;
use glam::Vec3;

/// Returns up to `count` landmarks closest to `query`, nearest first.
///
/// Candidates without a point are skipped. Equal distances keep the order in
/// which the candidates were given.
pub fn nearest_landmarks<'a, I>(candidates: I, query: Vec3, count: usize) -> Vec<&'a Landmark>
where
    I: IntoIterator<Item = &'a Landmark>,
{
    let mut scored: Vec<(f32, &Landmark)> = candidates
        .into_iter()
        .filter_map(|lm| lm.point.map(|p| (p.distance_squared(query), lm)))
        .collect();

    // sort_by is stable, so ties stay in candidate order
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.truncate(count);
    scored.into_iter().map(|(_, lm)| lm).collect()
}
