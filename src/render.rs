use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use itertools::Itertools;

use crate::config::Weights;
use crate::model::condition::ForbiddenPairs;
use crate::model::entity::Gender;
use crate::model::group::Partition;
use crate::score::{breakdown_group, AttributeCounts};

/// `Group <n>: <names>` per line, numbered from 1.
pub fn render_partition(partition: &Partition) -> String {
    partition
        .groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            format!(
                "Group {}: {}",
                i + 1,
                group.members.iter().map(|m| m.name.as_str()).join(", ")
            )
        })
        .join("\n")
}

/// Per-group attribute counts and penalties.
pub fn render_report(
    partition: &Partition,
    pairs: &ForbiddenPairs,
    target_size: usize,
    weights: &Weights,
) -> String {
    let gender_header = Gender::KNOWN.iter().map(|g| g.code()).join("/");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Group",
            "Size",
            gender_header.as_str(),
            "Ba/Ma",
            "Exch/Local",
            "Repeats",
            "Penalty",
        ]);

    for (i, group) in partition.groups.iter().enumerate() {
        let counts = AttributeCounts::of(group);
        let breakdown = breakdown_group(group, pairs, target_size, weights);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(group.len()),
            Cell::new(format!("{}/{}/{}", counts.female, counts.male, counts.diverse)),
            Cell::new(format!("{}/{}", counts.bachelor, counts.master)),
            Cell::new(format!("{}/{}", counts.exchange, counts.local)),
            Cell::new(breakdown.repeated_pairs),
            Cell::new(format!("{:.1}", breakdown.total())),
        ]);
    }
    table.to_string()
}
