// Position groups and ordered depth charts.
//
// A depth chart for one position group is an ordered list of player ids.
// Order is the only thing that separates a starter from a bench player:
// the first `num_starters` entries start, the rest sit.

use serde::{Deserialize, Serialize};

/// Unique player identifier, assigned by the simulation engine.
pub type PlayerId = u32;

/// The fixed position groups a depth chart is kept for.
///
/// Serialized with their on-wire abbreviations (QB, RB, ...), which are also
/// what the tab strip displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    QB,
    RB,
    WR,
    TE,
    OL,
    C,
    DL,
    LB,
    CB,
    S,
    K,
    P,
    KR,
    PR,
}

/// All position groups in tab-strip order.
pub const ALL_POSITION_GROUPS: [PositionGroup; 14] = [
    PositionGroup::QB,
    PositionGroup::RB,
    PositionGroup::WR,
    PositionGroup::TE,
    PositionGroup::OL,
    PositionGroup::C,
    PositionGroup::DL,
    PositionGroup::LB,
    PositionGroup::CB,
    PositionGroup::S,
    PositionGroup::K,
    PositionGroup::P,
    PositionGroup::KR,
    PositionGroup::PR,
];

impl PositionGroup {
    /// How many players at the front of this group's order are starters.
    ///
    /// Static configuration, not derived at runtime.
    pub fn num_starters(self) -> usize {
        match self {
            PositionGroup::QB => 1,
            PositionGroup::RB => 1,
            PositionGroup::WR => 3,
            PositionGroup::TE => 1,
            PositionGroup::OL => 4,
            PositionGroup::C => 1,
            PositionGroup::DL => 4,
            PositionGroup::LB => 3,
            PositionGroup::CB => 2,
            PositionGroup::S => 2,
            PositionGroup::K => 1,
            PositionGroup::P => 1,
            PositionGroup::KR => 1,
            PositionGroup::PR => 1,
        }
    }

    /// Display label, identical to the wire abbreviation.
    pub fn label(self) -> &'static str {
        match self {
            PositionGroup::QB => "QB",
            PositionGroup::RB => "RB",
            PositionGroup::WR => "WR",
            PositionGroup::TE => "TE",
            PositionGroup::OL => "OL",
            PositionGroup::C => "C",
            PositionGroup::DL => "DL",
            PositionGroup::LB => "LB",
            PositionGroup::CB => "CB",
            PositionGroup::S => "S",
            PositionGroup::K => "K",
            PositionGroup::P => "P",
            PositionGroup::KR => "KR",
            PositionGroup::PR => "PR",
        }
    }

    /// True when index `i` in this group's order denotes a starter.
    pub fn is_starter(self, i: usize) -> bool {
        i < self.num_starters()
    }

    /// The next group in tab order, wrapping at the end.
    pub fn next(self) -> PositionGroup {
        let i = ALL_POSITION_GROUPS
            .iter()
            .position(|g| *g == self)
            .unwrap_or(0);
        ALL_POSITION_GROUPS[(i + 1) % ALL_POSITION_GROUPS.len()]
    }

    /// The previous group in tab order, wrapping at the front.
    pub fn prev(self) -> PositionGroup {
        let i = ALL_POSITION_GROUPS
            .iter()
            .position(|g| *g == self)
            .unwrap_or(0);
        ALL_POSITION_GROUPS[(i + ALL_POSITION_GROUPS.len() - 1) % ALL_POSITION_GROUPS.len()]
    }
}

/// Relocate the element at `from` to index `to`, keeping every other
/// element's relative order (list-splice semantics).
///
/// Out-of-range indices leave the slice unchanged. `from == to` is a no-op.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out: Vec<T> = items.to_vec();
    if from >= out.len() || to >= out.len() || from == to {
        return out;
    }
    let moved = out.remove(from);
    out.insert(to, moved);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_move_forward() {
        let v = vec![1, 2, 3, 4, 5];
        assert_eq!(array_move(&v, 0, 3), vec![2, 3, 4, 1, 5]);
    }

    #[test]
    fn array_move_backward() {
        let v = vec![1, 2, 3, 4, 5];
        assert_eq!(array_move(&v, 4, 1), vec![1, 5, 2, 3, 4]);
    }

    #[test]
    fn array_move_same_index_is_noop() {
        let v = vec![1, 2, 3];
        assert_eq!(array_move(&v, 1, 1), vec![1, 2, 3]);
    }

    #[test]
    fn array_move_out_of_range_is_noop() {
        let v = vec![1, 2, 3];
        assert_eq!(array_move(&v, 5, 0), vec![1, 2, 3]);
        assert_eq!(array_move(&v, 0, 5), vec![1, 2, 3]);
    }

    #[test]
    fn array_move_preserves_relative_order_of_others() {
        let v = vec!['a', 'b', 'c', 'd', 'e'];
        let moved = array_move(&v, 2, 0);
        assert_eq!(moved, vec!['c', 'a', 'b', 'd', 'e']);
        // Everything except 'c' keeps its relative order.
        let rest: Vec<_> = moved.iter().filter(|c| **c != 'c').collect();
        assert_eq!(rest, vec![&'a', &'b', &'d', &'e']);
    }

    #[test]
    fn starter_boundary_wr() {
        let wr = PositionGroup::WR;
        assert_eq!(wr.num_starters(), 3);
        assert!(wr.is_starter(0));
        assert!(wr.is_starter(2));
        assert!(!wr.is_starter(3));
    }

    #[test]
    fn every_group_has_at_least_one_starter() {
        for g in ALL_POSITION_GROUPS {
            assert!(g.num_starters() >= 1, "{} has no starters", g.label());
        }
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(PositionGroup::PR.next(), PositionGroup::QB);
        assert_eq!(PositionGroup::QB.prev(), PositionGroup::PR);
        assert_eq!(PositionGroup::QB.next(), PositionGroup::RB);
    }

    #[test]
    fn labels_round_trip_through_serde() {
        for g in ALL_POSITION_GROUPS {
            let json = serde_json::to_string(&g).unwrap();
            assert_eq!(json, format!("\"{}\"", g.label()));
            let back: PositionGroup = serde_json::from_str(&json).unwrap();
            assert_eq!(back, g);
        }
    }
}
