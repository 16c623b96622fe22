#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use core::str::FromStr;
use ndarray::Array2;

pub use cell::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use render::*;
pub use types::*;

mod cell;
mod error;
mod field;
mod generator;
mod render;
mod reveal;
mod types;

/// Number of mines random placement puts on a field of `size`: a quarter of the cells,
/// rounded down.
pub const fn default_mine_count(size: Coord2) -> CellCount {
    mult(size.0, size.1) / 4
}

fn clamp_coord(value: usize) -> Coord {
    Coord::try_from(value).unwrap_or(Coord::MAX)
}

/// Explicit mine placement, stored row-major like the field itself.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        })
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GameError::InvalidSize);
        }
        let mut layout = Self {
            mine_mask,
            mine_count: 0,
        };
        layout.recount();
        Ok(layout)
    }

    /// Builds a layout from rows of cells, `rows[row][column]`.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some(ragged) = rows.iter().find(|row| row.as_ref().len() != width) {
            return Err(GameError::ShapeMismatch {
                expected: (clamp_coord(width), clamp_coord(height)),
                found: (clamp_coord(ragged.as_ref().len()), clamp_coord(height)),
            });
        }
        Self::from_mine_mask(Array2::from_shape_fn((height, width), |(y, x)| {
            rows[y].as_ref()[x]
        }))
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size)?;

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords(coords));
            }
            layout.mine_mask[coords.to_nd_index()] = true;
        }

        layout.recount();
        Ok(layout)
    }

    fn recount(&mut self) {
        self.mine_count = self.mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
    }

    /// Size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Ensures this layout fits a field of `size`.
    pub fn check_size(&self, size: Coord2) -> Result<()> {
        if self.size() == size {
            Ok(())
        } else {
            Err(GameError::ShapeMismatch {
                expected: size,
                found: self.size(),
            })
        }
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

/// Parses the board file format: a `X Y` header line followed by `Y` lines of `X`
/// whitespace-separated `0`/`1` cells.
impl FromStr for MineLayout {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines
            .next()
            .ok_or(GameError::MalformedLayout("missing size header"))?;
        let mut dims = header.split_whitespace().map(str::parse::<Coord>);
        let (Some(Ok(width)), Some(Ok(height)), None) = (dims.next(), dims.next(), dims.next())
        else {
            return Err(GameError::MalformedLayout("size header must be `X Y`"));
        };

        let expected = (width, height);
        let mut layout = Self::empty(expected)?;
        let mut rows = 0;

        for (y, line) in lines.enumerate() {
            if y >= usize::from(height) {
                return Err(GameError::ShapeMismatch {
                    expected,
                    found: (width, clamp_coord(y + 1)),
                });
            }

            let mut columns = 0;
            for (x, token) in line.split_whitespace().enumerate() {
                if x >= usize::from(width) {
                    return Err(GameError::ShapeMismatch {
                        expected,
                        found: (clamp_coord(x + 1), height),
                    });
                }
                layout.mine_mask[[y, x]] = match token {
                    "0" => false,
                    "1" => true,
                    _ => return Err(GameError::MalformedLayout("cells must be 0 or 1")),
                };
                columns = x + 1;
            }
            if columns != usize::from(width) {
                return Err(GameError::ShapeMismatch {
                    expected,
                    found: (clamp_coord(columns), height),
                });
            }
            rows = y + 1;
        }

        if rows != usize::from(height) {
            return Err(GameError::ShapeMismatch {
                expected,
                found: (width, clamp_coord(rows)),
            });
        }

        layout.recount();
        Ok(layout)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Out of bounds or already revealed.
    NoChange,
    /// One or more safe cells were opened.
    Revealed,
    /// The targeted cell held a mine, which is now gone.
    Detonated,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Detonated => true,
        }
    }

    pub const fn is_detonation(self) -> bool {
        matches!(self, Self::Detonated)
    }
}
