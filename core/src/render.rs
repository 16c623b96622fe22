use alloc::string::{String, ToString};
use core::fmt::{self, Display, Write};

use crate::*;

/// Terminates every row but the last.
pub const ROW_SEPARATOR: &str = "\r\n";

fn write_grid(f: &mut fmt::Formatter<'_>, field: &Field, glyph: fn(Cell) -> char) -> fmt::Result {
    for (y, row) in field.cells.rows().into_iter().enumerate() {
        if y > 0 {
            f.write_str(ROW_SEPARATOR)?;
        }
        for (x, &cell) in row.iter().enumerate() {
            if x > 0 {
                f.write_char(' ')?;
            }
            f.write_char(glyph(cell))?;
        }
    }
    Ok(())
}

/// The wire render: `-` hidden, `F` marked, digits for revealed counts, a blank for zero.
impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self, Cell::glyph)
    }
}

/// Omniscient render that also shows where the mines are, for local debugging.
#[derive(Copy, Clone, Debug)]
pub struct DebugView<'a>(&'a Field);

impl Display for DebugView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.0, Cell::debug_glyph)
    }
}

impl Field {
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn debug_view(&self) -> DebugView<'_> {
        DebugView(self)
    }
}
