//! Replay planning
//!
//! A typed order change moves one entry, but when locked entries sit between
//! its old and new place the movable entries it displaces also hop across
//! them. A surface that only applied the primary move would drag the locked
//! items along, so the plan adds fix-up moves of movable items until the
//! surface matches the new list.

use std::collections::HashSet;

use signing_core::{Identity, Move};

use crate::error::{Error, Result};
use crate::surface::StepDirection;

/// Ordered list of moves to replay onto a drag surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayPlan {
    moves: Vec<Move>,
}

impl ReplayPlan {
    /// Plan that replays exactly one move
    pub fn single(primary: Move) -> Self {
        let moves = if primary.from == primary.to {
            Vec::new()
        } else {
            vec![primary]
        };
        Self { moves }
    }

    /// Plan the moves that turn `before` into `after`
    ///
    /// `primary` is replayed first. Items in `pinned` are never picked up;
    /// when one of them is out of place, the movable item just ahead of it is
    /// stepped past it instead.
    ///
    /// # Errors
    ///
    /// [`Error::PlanMismatch`] when `before` and `after` do not hold the same
    /// items or `primary` does not describe an item of `before`.
    pub fn between(
        before: &[Identity],
        after: &[Identity],
        primary: &Move,
        pinned: &HashSet<Identity>,
    ) -> Result<Self> {
        if before.len() != after.len() {
            return Err(Error::PlanMismatch {
                message: format!(
                    "surface has {} items but the list has {}",
                    before.len(),
                    after.len()
                ),
            });
        }

        let mut surface = before.to_vec();
        let mut moves = Vec::new();

        if primary.from != primary.to {
            if surface.get(primary.from) != Some(&primary.identity)
                || primary.to >= surface.len()
            {
                return Err(Error::PlanMismatch {
                    message: format!(
                        "{} is not at position {}",
                        primary.identity, primary.from
                    ),
                });
            }
            apply(&mut surface, primary);
            moves.push(primary.clone());
        }

        for position in 0..after.len() {
            while surface[position] != after[position] {
                let wanted = &after[position];
                let current = surface[position..]
                    .iter()
                    .position(|item| item == wanted)
                    .map(|offset| position + offset)
                    .ok_or_else(|| Error::PlanMismatch {
                        message: format!("{} is missing from the surface", wanted),
                    })?;

                let fixup = if pinned.contains(wanted) {
                    Move::new(surface[current - 1].clone(), current - 1, current)
                } else {
                    Move::new(wanted.clone(), current, position)
                };
                apply(&mut surface, &fixup);
                moves.push(fixup);
            }
        }

        Ok(Self { moves })
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Total number of step primitives the plan issues
    pub fn total_steps(&self) -> usize {
        self.moves.iter().map(Move::distance).sum()
    }
}

/// Step primitives that carry an item from `mv.from` to `mv.to`
pub fn steps_for(mv: &Move) -> Vec<StepDirection> {
    let direction = if mv.to < mv.from {
        StepDirection::Up
    } else {
        StepDirection::Down
    };
    vec![direction; mv.distance()]
}

fn apply(surface: &mut Vec<Identity>, mv: &Move) {
    let item = surface.remove(mv.from);
    surface.insert(mv.to, item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(names: &[&str]) -> Vec<Identity> {
        names.iter().map(|n| Identity::new(*n)).collect()
    }

    #[test]
    fn steps_point_toward_the_target() {
        let up = Move::new(Identity::new("a"), 3, 1);
        assert_eq!(steps_for(&up), vec![StepDirection::Up, StepDirection::Up]);

        let down = Move::new(Identity::new("a"), 0, 3);
        assert_eq!(steps_for(&down), vec![StepDirection::Down; 3]);

        let still = Move::new(Identity::new("a"), 2, 2);
        assert!(steps_for(&still).is_empty());
    }

    #[test]
    fn single_move_without_locks() {
        let primary = Move::new(Identity::new("d"), 3, 0);
        let plan = ReplayPlan::between(
            &ids(&["a", "b", "c", "d"]),
            &ids(&["d", "a", "b", "c"]),
            &primary,
            &HashSet::new(),
        )
        .unwrap();

        assert_eq!(plan.moves(), &[primary]);
        assert_eq!(plan.total_steps(), 3);
    }

    #[test]
    fn displaced_entry_hops_back_over_pinned_item() {
        let primary = Move::new(Identity::new("c"), 2, 0);
        let pinned: HashSet<_> = [Identity::new("b")].into_iter().collect();

        let plan = ReplayPlan::between(
            &ids(&["a", "b", "c"]),
            &ids(&["c", "b", "a"]),
            &primary,
            &pinned,
        )
        .unwrap();

        assert_eq!(
            plan.moves(),
            &[primary, Move::new(Identity::new("a"), 1, 2)]
        );
    }

    #[test]
    fn pinned_items_are_never_lifted() {
        let primary = Move::new(Identity::new("a"), 0, 4);
        let pinned: HashSet<_> = [Identity::new("b"), Identity::new("d")]
            .into_iter()
            .collect();

        let plan = ReplayPlan::between(
            &ids(&["a", "b", "c", "d", "e"]),
            &ids(&["c", "b", "e", "d", "a"]),
            &primary,
            &pinned,
        )
        .unwrap();

        assert!(plan.moves().iter().all(|m| !pinned.contains(&m.identity)));

        let mut surface = ids(&["a", "b", "c", "d", "e"]);
        for mv in plan.moves() {
            apply(&mut surface, mv);
        }
        assert_eq!(surface, ids(&["c", "b", "e", "d", "a"]));
    }

    #[test]
    fn mismatched_lists_are_rejected() {
        let primary = Move::new(Identity::new("a"), 0, 1);
        let result = ReplayPlan::between(
            &ids(&["a", "b"]),
            &ids(&["b", "x"]),
            &primary,
            &HashSet::new(),
        );
        assert!(matches!(result, Err(Error::PlanMismatch { .. })));
    }

    #[test]
    fn single_plan_skips_zero_distance() {
        assert!(ReplayPlan::single(Move::new(Identity::new("a"), 1, 1)).is_empty());
    }
}
