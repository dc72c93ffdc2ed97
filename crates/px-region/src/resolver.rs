//! Active-region resolution: which one region the user is "in".

use px_core::GeoPoint;
use px_core::geo::distance_between;

use crate::{Region, RegionAccess, evaluate_access};

/// Added to a global region's score so that any in-range local region at the
/// same or better raw distance wins.
pub const GLOBAL_SCORE_OFFSET_M: f64 = 1_000_000.0;

/// Every region `point` may access, in input order, with its evaluation.
pub fn accessible_regions<'a>(
    regions: &'a [Region],
    point:   Option<&GeoPoint>,
) -> Vec<(&'a Region, RegionAccess)> {
    regions
        .iter()
        .map(|r| (r, evaluate_access(Some(r), point)))
        .filter(|(_, access)| access.allowed)
        .collect()
}

/// Ranking score for an accessible region; lower is better.
///
/// The raw distance is taken from the evaluation when it measured one, and
/// otherwise measured directly against the region's centre (global rooms
/// with a nominal anchor).  Unknown distance scores `+∞`.
pub fn region_score(region: &Region, access: &RegionAccess, point: Option<&GeoPoint>) -> f64 {
    let raw = access
        .distance_meters
        .unwrap_or_else(|| distance_between(point, region.valid_center()));
    let score = if raw.is_finite() { raw } else { f64::INFINITY };
    if region.is_effectively_global() {
        score + GLOBAL_SCORE_OFFSET_M
    } else {
        score
    }
}

/// Pick the single best accessible region for `point`.
///
/// The minimum score wins; ties go to the earliest region in `regions`.
/// Returns `None` for an empty list or when nothing is accessible.
pub fn resolve_active_region<'a>(
    regions: &'a [Region],
    point:   Option<&GeoPoint>,
) -> Option<&'a Region> {
    let mut best: Option<(&Region, f64)> = None;

    for region in regions {
        let access = evaluate_access(Some(region), point);
        if !access.allowed {
            continue;
        }
        let score = region_score(region, &access, point);
        // Strict `<` keeps the first of equal scores.
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((region, score)),
        }
    }

    best.map(|(region, _)| region)
}
