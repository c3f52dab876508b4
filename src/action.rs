use thiserror::Error;

use crate::config::validate_group_size;
use crate::error::ShuffleResult;
use crate::model::entity::Student;
use crate::model::group::{Group, Partition};

pub type Index = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub group_index: Index,
    pub member_index: Index,
}

impl Position {
    pub fn new(group_index: Index, member_index: Index) -> Position {
        Position { group_index, member_index }
    }
}

/// A one-for-one exchange of two members; group sizes never change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Swap(Position, Position),
}

impl Action {
    /// Group indices whose score changes when this action is applied.
    pub fn touched_groups(&self) -> Vec<Index> {
        match self {
            Action::Swap(p1, p2) if p1.group_index == p2.group_index => vec![p1.group_index],
            Action::Swap(p1, p2) => vec![p1.group_index, p2.group_index],
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Invalid position")]
    InvalidPosition,
}

impl Partition {
    pub fn get_member(&self, position: &Position) -> Option<&Student> {
        self.groups.get(position.group_index)?.members.get(position.member_index)
    }

    /// Applying the same swap twice restores the previous state.
    pub fn apply(&mut self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Swap(p1, p2) => {
                if self.get_member(p1).is_none() || self.get_member(p2).is_none() {
                    return Err(ActionError::InvalidPosition);
                }
                if p1.group_index == p2.group_index {
                    self.groups[p1.group_index]
                        .members
                        .swap(p1.member_index, p2.member_index);
                } else {
                    let (low, high) = if p1.group_index < p2.group_index {
                        (p1, p2)
                    } else {
                        (p2, p1)
                    };
                    let (head, tail) = self.groups.split_at_mut(high.group_index);
                    std::mem::swap(
                        &mut head[low.group_index].members[low.member_index],
                        &mut tail[0].members[high.member_index],
                    );
                }
                Ok(())
            }
        }
    }
}

/// Slices `students` into consecutive groups of `target_size`; the last
/// group keeps the remainder.
pub fn chunk_partition(students: Vec<Student>, target_size: usize) -> ShuffleResult<Partition> {
    validate_group_size(target_size)?;
    let mut groups = Vec::with_capacity(students.len().div_ceil(target_size));
    let mut members = students.into_iter().peekable();
    while members.peek().is_some() {
        groups.push(Group::new(members.by_ref().take(target_size).collect()));
    }
    Ok(Partition::new(groups))
}
