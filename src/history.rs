use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ShuffleResult;
use crate::model::condition::ForbiddenPairs;
use crate::model::entity::{Student, StudentId};
use crate::model::group::{Group, Partition};

/// Every pair of students that shared a group in any of `rounds`.
pub fn build_forbidden_pairs(rounds: &[Partition]) -> ForbiddenPairs {
    let mut pairs = ForbiddenPairs::new();
    for partition in rounds {
        add_partition(&mut pairs, partition);
    }
    pairs
}

fn add_partition(pairs: &mut ForbiddenPairs, partition: &Partition) {
    for group in &partition.groups {
        pairs.extend_group(group.members.iter().map(|m| &m.id));
    }
}

/// Accepted partitions of earlier rounds. The pair set only grows until
/// `clear` is called.
#[derive(Debug, Clone, Default)]
pub struct History {
    rounds: Vec<Partition>,
    pairs: ForbiddenPairs,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn accept(&mut self, partition: Partition) {
        add_partition(&mut self.pairs, &partition);
        self.rounds.push(partition);
        debug!(
            rounds = self.rounds.len(),
            pairs = self.pairs.len(),
            "partition accepted into history"
        );
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
        self.pairs.clear();
    }

    pub fn rounds(&self) -> &[Partition] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn forbidden_pairs(&self) -> &ForbiddenPairs {
        &self.pairs
    }

    /// Builds history from rounds of groups of display names. Names are
    /// resolved against `roster`; unknown names become students with
    /// unknown attributes.
    pub fn from_names(rounds: Vec<Vec<Vec<String>>>, roster: &[Student]) -> History {
        let by_id: HashMap<&StudentId, &Student> =
            roster.iter().map(|student| (&student.id, student)).collect();
        let mut history = History::new();
        for round in rounds {
            let groups = round
                .into_iter()
                .map(|names| {
                    Group::new(
                        names
                            .iter()
                            .map(|name| {
                                let id = StudentId::from_name(name);
                                match by_id.get(&id) {
                                    Some(student) => (*student).clone(),
                                    None => {
                                        warn!(name = name.as_str(), "history name not in roster");
                                        Student::named(name)
                                    }
                                }
                            })
                            .collect(),
                    )
                })
                .collect();
            history.accept(Partition::new(groups));
        }
        history
    }

    /// Reads a JSON array of rounds, each an array of groups of names.
    pub fn load_from_file<P: AsRef<Path>>(path: P, roster: &[Student]) -> ShuffleResult<History> {
        let content = fs::read_to_string(path)?;
        let rounds: Vec<Vec<Vec<String>>> = serde_json::from_str(&content)?;
        Ok(History::from_names(rounds, roster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(groups: &[&[&str]]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| g.iter().map(|n| n.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_history_has_no_pairs() {
        assert!(build_forbidden_pairs(&[]).is_empty());
        assert!(History::new().forbidden_pairs().is_empty());
    }

    #[test]
    fn test_accept_grows_and_clear_resets() {
        let roster: Vec<Student> = ["a", "b", "c", "d"].iter().map(|n| Student::named(n)).collect();
        let mut history = History::from_names(vec![names(&[&["a", "b"], &["c", "d"]])], &roster);
        assert_eq!(history.forbidden_pairs().len(), 2);

        history.accept(Partition::new(vec![
            Group::new(vec![roster[0].clone(), roster[2].clone()]),
            Group::new(vec![roster[1].clone(), roster[3].clone()]),
        ]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.forbidden_pairs().len(), 4);
        assert!(history.forbidden_pairs().contains("c", "a"));

        history.clear();
        assert!(history.is_empty());
        assert!(history.forbidden_pairs().is_empty());
    }

    #[test]
    fn test_from_names_resolves_roster_entries() {
        let roster = vec![Student::new(
            "Ann Lee",
            crate::model::entity::Gender::Female,
            crate::model::entity::Level::Master,
            crate::model::entity::Exchange::No,
        )];
        let history = History::from_names(vec![names(&[&["ann  lee", "Zed"]])], &roster);
        let group = &history.rounds()[0].groups[0];
        assert_eq!(group.members[0], roster[0]);
        assert_eq!(group.members[1].name, "Zed");
        assert!(history.forbidden_pairs().contains("ann lee", "zed"));
    }

    #[test]
    fn test_matches_builder() {
        let roster: Vec<Student> = ["a", "b", "c"].iter().map(|n| Student::named(n)).collect();
        let history = History::from_names(vec![names(&[&["a", "b", "c"]])], &roster);
        assert_eq!(
            history.forbidden_pairs(),
            &build_forbidden_pairs(history.rounds())
        );
    }
}
