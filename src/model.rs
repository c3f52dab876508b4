pub mod entity {
    use std::borrow::Borrow;
    use std::collections::HashSet;
    use std::fmt;

    use itertools::Itertools;
    use serde::{Deserialize, Serialize};

    /// Uniqueness key of a student: the display name, lowercased with
    /// whitespace collapsed. Deserializing normalizes the same way.
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub struct StudentId(String);

    impl From<String> for StudentId {
        fn from(name: String) -> Self {
            StudentId::from_name(&name)
        }
    }

    impl From<StudentId> for String {
        fn from(id: StudentId) -> Self {
            id.0
        }
    }

    impl StudentId {
        pub fn from_name(name: &str) -> StudentId {
            StudentId(name.split_whitespace().join(" ").to_lowercase())
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl Borrow<str> for StudentId {
        fn borrow(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for StudentId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Gender {
        Female,
        Male,
        Diverse,
        Unknown,
    }

    impl Gender {
        pub const KNOWN: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Diverse];

        pub fn from_code(code: &str) -> Gender {
            match code.trim().to_lowercase().as_str() {
                "f" | "w" | "female" => Gender::Female,
                "m" | "male" => Gender::Male,
                "x" | "d" | "diverse" | "other" => Gender::Diverse,
                _ => Gender::Unknown,
            }
        }

        pub fn is_known(self) -> bool {
            self != Gender::Unknown
        }

        pub fn code(self) -> &'static str {
            match self {
                Gender::Female => "f",
                Gender::Male => "m",
                Gender::Diverse => "x",
                Gender::Unknown => "?",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Level {
        Bachelor,
        Master,
        Unknown,
    }

    impl Level {
        pub fn from_code(code: &str) -> Level {
            match code.trim().to_lowercase().as_str() {
                "b" | "ba" | "bsc" | "bachelor" => Level::Bachelor,
                "m" | "ma" | "msc" | "master" => Level::Master,
                _ => Level::Unknown,
            }
        }

        pub fn is_known(self) -> bool {
            self != Level::Unknown
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Exchange {
        Yes,
        No,
        Unknown,
    }

    impl Exchange {
        pub fn from_code(code: &str) -> Exchange {
            match code.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Exchange::Yes,
                "false" | "no" | "n" | "0" => Exchange::No,
                _ => Exchange::Unknown,
            }
        }

        pub fn is_known(self) -> bool {
            self != Exchange::Unknown
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Student {
        pub id: StudentId,
        pub name: String,
        pub gender: Gender,
        pub level: Level,
        pub exchange: Exchange,
    }

    impl Student {
        pub fn new(name: &str, gender: Gender, level: Level, exchange: Exchange) -> Student {
            let name = name.split_whitespace().join(" ");
            Student {
                id: StudentId::from_name(&name),
                name,
                gender,
                level,
                exchange,
            }
        }

        /// A student with every attribute unknown.
        pub fn named(name: &str) -> Student {
            Student::new(name, Gender::Unknown, Level::Unknown, Exchange::Unknown)
        }
    }

    /// Drops later students whose id was already seen.
    pub fn dedup_students(students: Vec<Student>) -> Vec<Student> {
        let mut seen = HashSet::new();
        students
            .into_iter()
            .filter(|student| seen.insert(student.id.clone()))
            .collect()
    }
}


pub mod group {
    use super::entity::{Student, StudentId};

    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Group {
        pub members: Vec<Student>,
    }

    impl Group {
        pub fn new(members: Vec<Student>) -> Group {
            Group { members }
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }

        pub fn names(&self) -> Vec<String> {
            self.members.iter().map(|m| m.name.clone()).collect()
        }
    }

    /// Disjoint groups covering the whole roster.
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Partition {
        pub groups: Vec<Group>,
    }

    impl Partition {
        pub fn new(groups: Vec<Group>) -> Partition {
            Partition { groups }
        }

        pub fn len(&self) -> usize {
            self.groups.len()
        }

        pub fn is_empty(&self) -> bool {
            self.groups.is_empty()
        }

        pub fn student_count(&self) -> usize {
            self.groups.iter().map(Group::len).sum()
        }

        pub fn ids(&self) -> Vec<&StudentId> {
            self.groups
                .iter()
                .flat_map(|group| group.members.iter().map(|m| &m.id))
                .collect()
        }

        pub fn names(&self) -> Vec<Vec<String>> {
            self.groups.iter().map(Group::names).collect()
        }
    }
}

pub mod condition {
    use std::collections::{HashMap, HashSet};

    use super::entity::StudentId;

    pub type Score = f64;

    /// Unordered pairs of students that already shared a group.
    ///
    /// Stored as a symmetric adjacency map so lookups can borrow ids
    /// without allocating.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ForbiddenPairs {
        adjacency: HashMap<StudentId, HashSet<StudentId>>,
        n_pairs: usize,
    }

    impl ForbiddenPairs {
        pub fn new() -> ForbiddenPairs {
            ForbiddenPairs::default()
        }

        /// Returns true if the pair was not present yet. Self-pairs are ignored.
        pub fn insert(&mut self, a: &StudentId, b: &StudentId) -> bool {
            if a == b {
                return false;
            }
            let added = self
                .adjacency
                .entry(a.clone())
                .or_default()
                .insert(b.clone());
            if added {
                self.adjacency.entry(b.clone()).or_default().insert(a.clone());
                self.n_pairs += 1;
            }
            added
        }

        pub fn contains(&self, a: &str, b: &str) -> bool {
            self.adjacency
                .get(a)
                .map_or(false, |partners| partners.contains(b))
        }

        /// Inserts every pair of distinct members of one group.
        pub fn extend_group<'a, I>(&mut self, ids: I)
        where
            I: IntoIterator<Item = &'a StudentId>,
        {
            let ids: Vec<&StudentId> = ids.into_iter().collect();
            for (i, a) in ids.iter().enumerate() {
                for b in &ids[i + 1..] {
                    self.insert(a, b);
                }
            }
        }

        pub fn len(&self) -> usize {
            self.n_pairs
        }

        pub fn is_empty(&self) -> bool {
            self.n_pairs == 0
        }

        pub fn clear(&mut self) {
            self.adjacency.clear();
            self.n_pairs = 0;
        }

        /// Every pair once, as `(lower, higher)`, sorted.
        pub fn pairs(&self) -> Vec<(&StudentId, &StudentId)> {
            let mut pairs: Vec<_> = self
                .adjacency
                .iter()
                .flat_map(|(a, partners)| {
                    partners.iter().filter(move |b| a < *b).map(move |b| (a, b))
                })
                .collect();
            pairs.sort();
            pairs
        }
    }
}
