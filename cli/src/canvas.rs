use std::fmt;

use memefield_core::{Glyph, Renderer, ScreenPos, ScreenRect};

pub(crate) const fn glyph_char(glyph: Glyph) -> char {
    use Glyph::*;
    match glyph {
        Hidden => '#',
        Flag => 'F',
        Number(0) => '.',
        Number(count) => (b'0' + count) as char,
        Mine => '*',
        Detonated => 'X',
        WrongFlag => 'x',
        FlaggedMine => '!',
    }
}

/// Character grid the board draws itself into, one character per screen unit.
#[derive(Debug, Default)]
pub(crate) struct TextCanvas {
    origin: ScreenPos,
    width: usize,
    height: usize,
    chars: Vec<char>,
}

impl TextCanvas {
    fn put(&mut self, pos: ScreenPos, ch: char) {
        let x = pos.x - self.origin.x;
        let y = pos.y - self.origin.y;
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            log::warn!("Tile at {:?} falls outside the canvas", pos);
            return;
        }
        self.chars[y as usize * self.width + x as usize] = ch;
    }
}

impl Renderer for TextCanvas {
    fn draw_background(&mut self, rect: ScreenRect) {
        self.origin = rect.origin;
        self.width = rect.width as usize;
        self.height = rect.height as usize;
        self.chars = vec![' '; self.width * self.height];
    }

    fn draw_tile(&mut self, pos: ScreenPos, glyph: Glyph) {
        self.put(pos, glyph_char(glyph));
    }
}

/// Prints the grid with column digits on top and row numbers on the left.
impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for x in 0..self.width {
            write!(f, "{}", (self.origin.x as i64 + x as i64).rem_euclid(10))?;
        }
        writeln!(f)?;

        for (y, row) in self.chars.chunks(self.width.max(1)).enumerate() {
            write!(f, "{:>3} ", self.origin.y as i64 + y as i64)?;
            for ch in row {
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
