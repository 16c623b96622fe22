/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Marked,
    Revealed,
}

/// One grid position as stored by the field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) visibility: Visibility,
    pub(crate) has_mine: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn visibility(self) -> Visibility {
        self.visibility
    }

    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    /// Mines among the up-to-eight neighbours, kept in sync with the current layout.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    pub const fn is_marked(self) -> bool {
        matches!(self.visibility, Visibility::Marked)
    }

    /// Glyph used by the wire render.
    pub fn glyph(self) -> char {
        use Visibility::*;
        match self.visibility {
            Hidden => '-',
            Marked => 'F',
            Revealed if self.adjacent_mines == 0 => ' ',
            Revealed => digit(self.adjacent_mines),
        }
    }

    /// Glyph used by the omniscient debug render, which also exposes mines.
    pub fn debug_glyph(self) -> char {
        use Visibility::*;
        match (self.visibility, self.has_mine) {
            (Hidden, true) => '*',
            (Marked, true) => '#',
            (Revealed, true) => 'B',
            _ => self.glyph(),
        }
    }
}

fn digit(count: u8) -> char {
    char::from_digit(count.into(), 10).unwrap_or('?')
}
