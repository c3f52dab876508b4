use crate::action::Index;
use crate::config::Weights;
use crate::model::condition::{ForbiddenPairs, Score};
use crate::model::group::Partition;
use crate::score::score_group;

/// Per-group scores of the partition under search, so a swap only rescores
/// the groups it touched.
#[derive(Debug, Clone)]
pub struct ScoreCache<'a> {
    pairs: &'a ForbiddenPairs,
    weights: &'a Weights,
    target_size: usize,
    group_scores: Vec<Score>,
    penalty_score: Score,
}

impl<'a> ScoreCache<'a> {
    pub fn create(
        partition: &Partition,
        pairs: &'a ForbiddenPairs,
        target_size: usize,
        weights: &'a Weights,
    ) -> ScoreCache<'a> {
        let group_scores = partition
            .groups
            .iter()
            .map(|group| score_group(group, pairs, target_size, weights))
            .collect();
        let mut cache = ScoreCache {
            pairs,
            weights,
            target_size,
            group_scores,
            penalty_score: 0.0,
        };
        cache.penalty_score = cache.sum();
        cache
    }

    pub fn score(&self) -> Score {
        self.penalty_score
    }

    pub fn group_score(&self, group_index: Index) -> Option<Score> {
        self.group_scores.get(group_index).copied()
    }

    /// Rescores `group_indices` from `partition` and returns the new total.
    ///
    /// The total is summed from scratch so it stays bit-identical to
    /// `score_partition` on the same state.
    pub fn rescore(&mut self, partition: &Partition, group_indices: &[Index]) -> Score {
        for &index in group_indices {
            if let (Some(slot), Some(group)) =
                (self.group_scores.get_mut(index), partition.groups.get(index))
            {
                *slot = score_group(group, self.pairs, self.target_size, self.weights);
            }
        }
        self.penalty_score = self.sum();
        self.penalty_score
    }

    /// Saves the scores of `group_indices` for a later `restore`.
    pub fn snapshot(&self, group_indices: &[Index]) -> Vec<(Index, Score)> {
        group_indices
            .iter()
            .filter_map(|&index| self.group_score(index).map(|score| (index, score)))
            .collect()
    }

    pub fn restore(&mut self, saved: &[(Index, Score)]) {
        for &(index, score) in saved {
            self.group_scores[index] = score;
        }
        self.penalty_score = self.sum();
    }

    fn sum(&self) -> Score {
        self.group_scores.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{chunk_partition, Action, Position};
    use crate::model::entity::{Exchange, Gender, Level, Student};
    use crate::score::score_partition;

    fn roster() -> Vec<Student> {
        vec![
            Student::new("a", Gender::Female, Level::Master, Exchange::No),
            Student::new("b", Gender::Female, Level::Master, Exchange::No),
            Student::new("c", Gender::Male, Level::Bachelor, Exchange::Yes),
            Student::new("d", Gender::Male, Level::Bachelor, Exchange::Yes),
            Student::new("e", Gender::Diverse, Level::Unknown, Exchange::Unknown),
        ]
    }

    #[test]
    fn test_rescore_matches_full_score() {
        let weights = Weights::default();
        let mut pairs = ForbiddenPairs::new();
        let students = roster();
        pairs.insert(&students[0].id, &students[2].id);

        let mut partition = chunk_partition(students, 2).unwrap();
        let mut cache = ScoreCache::create(&partition, &pairs, 2, &weights);
        assert_eq!(cache.score(), score_partition(&partition, &pairs, 2, &weights));

        let action = Action::Swap(Position::new(0, 1), Position::new(1, 0));
        partition.apply(&action).unwrap();
        let rescored = cache.rescore(&partition, &action.touched_groups());
        assert_eq!(rescored, score_partition(&partition, &pairs, 2, &weights));
    }

    #[test]
    fn test_restore_reverts_scores() {
        let weights = Weights::default();
        let pairs = ForbiddenPairs::new();
        let mut partition = chunk_partition(roster(), 2).unwrap();
        let mut cache = ScoreCache::create(&partition, &pairs, 2, &weights);
        let before = cache.score();

        let action = Action::Swap(Position::new(0, 0), Position::new(2, 0));
        let touched = action.touched_groups();
        let saved = cache.snapshot(&touched);
        partition.apply(&action).unwrap();
        cache.rescore(&partition, &touched);
        partition.apply(&action).unwrap();
        cache.restore(&saved);

        assert_eq!(cache.score(), before);
        assert_eq!(cache.score(), score_partition(&partition, &pairs, 2, &weights));
    }
}
