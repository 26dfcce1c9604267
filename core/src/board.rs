use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many cells of each kind a board holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub diamonds: CellCount,
    pub rare_diamonds: CellCount,
    pub super_diamonds: CellCount,
    pub bombs: CellCount,
}

impl KindCounts {
    pub(crate) fn add(&mut self, kind: CellKind) {
        use CellKind::*;
        match kind {
            Diamond => self.diamonds += 1,
            RareDiamond => self.rare_diamonds += 1,
            SuperDiamond => self.super_diamonds += 1,
            Bomb => self.bombs += 1,
        }
    }

    /// All non-bomb cells, whatever their rarity.
    pub const fn all_diamonds(&self) -> CellCount {
        self.diamonds + self.rare_diamonds + self.super_diamonds
    }
}

/// Square grid of cells, indexed by `(row, col)`.
///
/// Stored boards are checked like freshly built ones, and their counters are recomputed from the cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredBoard")]
pub struct Board {
    cells: Array2<Cell>,
    bomb_count: CellCount,
    revealed_count: CellCount,
}

#[derive(Deserialize)]
struct StoredBoard {
    cells: Array2<Cell>,
}

impl TryFrom<StoredBoard> for Board {
    type Error = GameError;

    fn try_from(stored: StoredBoard) -> Result<Self> {
        Self::from_cells(stored.cells)
    }
}

fn check_shape((rows, cols): (usize, usize)) -> Result<Coord> {
    if rows == 0 || cols == 0 {
        return Err(GameError::EmptyBoard);
    }
    if rows != cols || rows > usize::from(Coord::MAX) {
        return Err(GameError::InvalidCoords);
    }
    Ok(rows as Coord)
}

impl Board {
    /// Builds a board from a square grid of kinds, all cells hidden.
    ///
    /// `nonce` distinguishes the cell ids of this board from those of other boards.
    pub fn from_kinds(kinds: &Array2<CellKind>, nonce: u64) -> Result<Self> {
        check_shape(kinds.dim())?;
        let mut index: CellCount = 0;
        let cells = kinds.mapv(|kind| {
            let cell = Cell::hidden(kind, CellId::new(nonce, index));
            index += 1;
            cell
        });
        Self::from_cells(cells)
    }

    fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let size = check_shape(cells.dim())?;
        let bomb_count = cells.iter().filter(|cell| cell.kind.is_bomb()).count() as CellCount;
        if bomb_count == area(size) {
            return Err(GameError::TooManyBombs);
        }
        let revealed_count = cells.iter().filter(|cell| cell.revealed).count() as CellCount;

        Ok(Self {
            cells,
            bomb_count,
            revealed_count,
        })
    }

    /// Convenience constructor from row slices, mostly for fixtures.
    pub fn from_rows(rows: &[&[CellKind]], nonce: u64) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidCoords);
        }
        let flat = rows.iter().flat_map(|row| row.iter().copied()).collect();
        let kinds =
            Array2::from_shape_vec((size, size), flat).map_err(|_| GameError::InvalidCoords)?;
        Self::from_kinds(&kinds, nonce)
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size())
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn diamond_count(&self) -> CellCount {
        self.total_cells() - self.bomb_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Marks the cell as revealed and returns its kind, or `None` when it already was.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Option<CellKind>> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return Ok(None);
        }
        cell.revealed = true;
        self.revealed_count += 1;
        Ok(Some(cell.kind))
    }

    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for cell in self.cells.iter() {
            counts.add(cell.kind);
        }
        counts
    }

    /// Cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

/// One glyph per cell: `*` bomb, `S` super, `R` rare, `.` diamond.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                let glyph = match cell.kind {
                    CellKind::Bomb => '*',
                    CellKind::SuperDiamond => 'S',
                    CellKind::RareDiamond => 'R',
                    CellKind::Diamond => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
