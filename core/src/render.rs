use crate::*;

/// Draws the board, implemented by the host.
///
/// The board hands out read-only state once per frame and never decides colors or sprites beyond the [`Glyph`].
pub trait Renderer {
    fn draw_background(&mut self, rect: ScreenRect);

    fn draw_tile(&mut self, pos: ScreenPos, glyph: Glyph);
}

impl Board {
    /// Draws the background and then every tile in row-major order.
    pub fn draw<R: Renderer + ?Sized>(&self, layout: &BoardLayout, renderer: &mut R) {
        assert_eq!(layout.size(), self.size(), "layout is for another board");
        renderer.draw_background(layout.rect());
        for (coords, _) in self.cells() {
            renderer.draw_tile(layout.grid_to_screen(coords), self.glyph_at(coords));
        }
    }
}
