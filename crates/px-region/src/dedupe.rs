//! Collapsing duplicate rooms in a store listing.
//!
//! The store can hold several copies of the same room (two clients racing to
//! provision a preset, or a rename that left the old copy behind). Copies are
//! grouped by preset key when the room has one, otherwise by normalised name.
//! Within a group the copy with the most participants survives; on a tie the
//! first one seen does.

use std::collections::HashMap;

use crate::{Region, normalize_region_name};

/// Deduplicate `regions`. Preset rooms come first, then the rest, each group
/// in first-seen order.
pub fn dedupe_regions(regions: impl IntoIterator<Item = Region>) -> Vec<Region> {
    let mut by_preset: Vec<Region> = Vec::new();
    let mut by_name:   Vec<Region> = Vec::new();
    let mut preset_index: HashMap<String, usize> = HashMap::new();
    let mut name_index:   HashMap<String, usize> = HashMap::new();

    for region in regions {
        let (slot, group, index) = match &region.preset_key {
            Some(key) => (key.clone(), &mut by_preset, &mut preset_index),
            None => (normalize_region_name(&region.name), &mut by_name, &mut name_index),
        };
        match index.get(&slot) {
            Some(&i) => {
                if region.participant_count > group[i].participant_count {
                    group[i] = region;
                }
            }
            None => {
                index.insert(slot, group.len());
                group.push(region);
            }
        }
    }

    by_preset.extend(by_name);
    by_preset
}
