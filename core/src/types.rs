/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Level number, starting at 1. Used both for board levels and player levels.
pub type Level = u32;

/// Points, as banked into high scores and profile totals.
pub type Score = u64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Cell count of a square board with `size` rows.
pub const fn area(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

/// Maps a flat row-major index back into coordinates on a square board.
pub(crate) const fn unflatten(index: CellCount, size: Coord) -> Coord2 {
    let size = size as CellCount;
    ((index / size) as Coord, (index % size) as Coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_saturates_instead_of_wrapping() {
        assert_eq!(area(12), 144);
        assert_eq!(area(Coord::MAX), 65025);
    }

    #[test]
    fn unflatten_is_row_major() {
        assert_eq!(unflatten(0, 5), (0, 0));
        assert_eq!(unflatten(7, 5), (1, 2));
        assert_eq!(unflatten(24, 5), (4, 4));
    }
}
