use derive_more::{Add, Mul};

/// A displacement on the chess board, in rows and columns.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Add, Mul)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Direction {
    #[cfg_attr(test, strategy(-8i8..8))]
    pub row: i8,
    #[cfg_attr(test, strategy(-8i8..8))]
    pub col: i8,
}

impl Direction {
    /// Constructs [`Direction`] from row and column deltas.
    pub const fn new(row: i8, col: i8) -> Self {
        Direction { row, col }
    }

    /// Towards row 0, where the Black figures start.
    pub const NORTH: Self = Direction::new(-1, 0);
    pub const SOUTH: Self = Direction::new(1, 0);
    pub const EAST: Self = Direction::new(0, 1);
    pub const WEST: Self = Direction::new(0, -1);
    pub const NORTH_EAST: Self = Direction::new(-1, 1);
    pub const NORTH_WEST: Self = Direction::new(-1, -1);
    pub const SOUTH_EAST: Self = Direction::new(1, 1);
    pub const SOUTH_WEST: Self = Direction::new(1, -1);

    /// Along files and ranks.
    pub const ORTHOGONAL: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::EAST, Self::WEST];

    /// Along diagonals.
    pub const DIAGONAL: [Self; 4] = [
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];

    /// All eight neighbors.
    pub const ALL: [Self; 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::EAST,
        Self::WEST,
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];

    /// The knight's jumps.
    pub const KNIGHT: [Self; 8] = [
        Direction::new(-2, 1),
        Direction::new(-2, -1),
        Direction::new(-1, 2),
        Direction::new(-1, -2),
        Direction::new(1, 2),
        Direction::new(1, -2),
        Direction::new(2, 1),
        Direction::new(2, -1),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn diagonals_are_compositions_of_orthogonal_directions() {
        assert_eq!(Direction::NORTH + Direction::EAST, Direction::NORTH_EAST);
        assert_eq!(Direction::NORTH + Direction::WEST, Direction::NORTH_WEST);
        assert_eq!(Direction::SOUTH + Direction::EAST, Direction::SOUTH_EAST);
        assert_eq!(Direction::SOUTH + Direction::WEST, Direction::SOUTH_WEST);
    }

    #[test]
    fn knight_jumps_are_one_step_and_two_steps_at_right_angles() {
        for d in [Direction::NORTH, Direction::SOUTH] {
            for e in [Direction::EAST, Direction::WEST] {
                assert!(Direction::KNIGHT.contains(&(d * 2i8 + e)));
                assert!(Direction::KNIGHT.contains(&(d + e * 2i8)));
            }
        }
    }

    #[proptest]
    fn opposite_directions_cancel_out(d: Direction) {
        assert_eq!(d + d * -1i8, Direction::new(0, 0));
    }

    #[proptest]
    fn scaling_is_repeated_addition(d: Direction) {
        assert_eq!(d * 3i8, d + d + d);
    }
}
