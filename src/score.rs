//! Penalty of a group and of a whole partition.
//!
//! Every term is additive and depends on one group only, so a partition's
//! score is the plain sum of its group scores.

use itertools::Itertools;

use crate::config::Weights;
use crate::model::condition::{ForbiddenPairs, Score};
use crate::model::entity::{Exchange, Gender, Level};
use crate::model::group::{Group, Partition};

/// Attribute tallies of one group. Unknown values are counted separately
/// and never take part in a balance term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeCounts {
    pub female: usize,
    pub male: usize,
    pub diverse: usize,
    pub bachelor: usize,
    pub master: usize,
    pub exchange: usize,
    pub local: usize,
}

impl AttributeCounts {
    pub fn of(group: &Group) -> AttributeCounts {
        let mut counts = AttributeCounts::default();
        for member in &group.members {
            match member.gender {
                Gender::Female => counts.female += 1,
                Gender::Male => counts.male += 1,
                Gender::Diverse => counts.diverse += 1,
                Gender::Unknown => {}
            }
            match member.level {
                Level::Bachelor => counts.bachelor += 1,
                Level::Master => counts.master += 1,
                Level::Unknown => {}
            }
            match member.exchange {
                Exchange::Yes => counts.exchange += 1,
                Exchange::No => counts.local += 1,
                Exchange::Unknown => {}
            }
        }
        counts
    }

    pub fn known_genders(&self) -> usize {
        self.female + self.male + self.diverse
    }

    pub fn known_levels(&self) -> usize {
        self.bachelor + self.master
    }

    pub fn known_exchange(&self) -> usize {
        self.exchange + self.local
    }

    /// Max minus min over all three gender categories, empty ones included.
    pub fn gender_spread(&self) -> usize {
        let counts = [self.female, self.male, self.diverse];
        match counts.iter().minmax().into_option() {
            Some((min, max)) => max - min,
            None => 0,
        }
    }

    pub fn level_spread(&self) -> usize {
        self.bachelor.abs_diff(self.master)
    }

    pub fn exchange_spread(&self) -> usize {
        self.exchange.abs_diff(self.local)
    }
}

/// The individual penalty terms of one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBreakdown {
    pub repeated_pairs: usize,
    pub forbid: Score,
    pub size: Score,
    pub gender: Score,
    pub level: Score,
    pub exchange: Score,
}

impl GroupBreakdown {
    pub fn total(&self) -> Score {
        self.forbid + self.size + self.gender + self.level + self.exchange
    }
}

pub fn count_repeated_pairs(group: &Group, pairs: &ForbiddenPairs) -> usize {
    if pairs.is_empty() {
        return 0;
    }
    group
        .members
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| pairs.contains(a.id.as_str(), b.id.as_str()))
        .count()
}

pub fn breakdown_group(
    group: &Group,
    pairs: &ForbiddenPairs,
    target_size: usize,
    weights: &Weights,
) -> GroupBreakdown {
    let repeated_pairs = count_repeated_pairs(group, pairs);
    let counts = AttributeCounts::of(group);

    let mut breakdown = GroupBreakdown {
        repeated_pairs,
        forbid: weights.forbid_pair * repeated_pairs as Score,
        size: weights.size_imbalance * group.len().abs_diff(target_size) as Score,
        ..Default::default()
    };
    if counts.known_genders() >= 2 {
        breakdown.gender = weights.gender_imbalance * counts.gender_spread() as Score;
    }
    if counts.known_levels() >= 2 {
        breakdown.level = weights.level_imbalance * counts.level_spread() as Score;
    }
    if counts.known_exchange() >= 2 {
        breakdown.exchange = weights.exchange_imbalance * counts.exchange_spread() as Score;
    }
    breakdown
}

pub fn score_group(
    group: &Group,
    pairs: &ForbiddenPairs,
    target_size: usize,
    weights: &Weights,
) -> Score {
    breakdown_group(group, pairs, target_size, weights).total()
}

pub fn score_partition(
    partition: &Partition,
    pairs: &ForbiddenPairs,
    target_size: usize,
    weights: &Weights,
) -> Score {
    partition
        .groups
        .iter()
        .map(|group| score_group(group, pairs, target_size, weights))
        .sum()
}
