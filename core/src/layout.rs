use serde::{Deserialize, Serialize};

use crate::*;

/// A point in the host's screen coordinate space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub origin: ScreenPos,
    pub width: u32,
    pub height: u32,
}

/// Where the board sits on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner of the board at the screen origin
    #[default]
    Origin,
    /// Board centered on the given point
    Centered(ScreenPos),
}

/// Maps between screen positions and grid coordinates for a board of fixed size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    size: Coord2,
    tile_size: u32,
    origin: ScreenPos,
}

impl BoardLayout {
    pub fn new(size: Coord2, tile_size: u32, anchor: Anchor) -> Result<Self> {
        if tile_size == 0 {
            return Err(GameError::InvalidTileSize);
        }
        let tile_size_i32 = i32::try_from(tile_size).map_err(|_| GameError::InvalidTileSize)?;
        let pixel_width = tile_size_i32
            .checked_mul(size.0.into())
            .ok_or(GameError::InvalidTileSize)?;
        let pixel_height = tile_size_i32
            .checked_mul(size.1.into())
            .ok_or(GameError::InvalidTileSize)?;

        let origin = match anchor {
            Anchor::Origin => ScreenPos::default(),
            Anchor::Centered(center) => ScreenPos::new(
                center
                    .x
                    .checked_sub(pixel_width / 2)
                    .ok_or(GameError::LayoutOutOfRange)?,
                center
                    .y
                    .checked_sub(pixel_height / 2)
                    .ok_or(GameError::LayoutOutOfRange)?,
            ),
        };
        // every tile position lies between the origin and the far corner
        origin
            .x
            .checked_add(pixel_width)
            .zip(origin.y.checked_add(pixel_height))
            .ok_or(GameError::LayoutOutOfRange)?;
        log::debug!(
            "Board layout {:?}, tile size {}, origin {:?}",
            size,
            tile_size,
            origin
        );

        Ok(Self {
            size,
            tile_size,
            origin,
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn origin(&self) -> ScreenPos {
        self.origin
    }

    /// The rectangle covered by the whole board.
    pub fn rect(&self) -> ScreenRect {
        ScreenRect {
            origin: self.origin,
            width: self.tile_size * u32::from(self.size.0),
            height: self.tile_size * u32::from(self.size.1),
        }
    }

    pub fn contains(&self, pos: ScreenPos) -> bool {
        let rect = self.rect();
        let dx = i64::from(pos.x) - i64::from(rect.origin.x);
        let dy = i64::from(pos.y) - i64::from(rect.origin.y);
        (0..i64::from(rect.width)).contains(&dx) && (0..i64::from(rect.height)).contains(&dy)
    }

    /// Grid coordinates of the tile under `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the board, callers must check [`BoardLayout::contains`] first.
    pub fn screen_to_grid(&self, pos: ScreenPos) -> Coord2 {
        assert!(self.contains(pos), "{pos:?} is outside the board");
        let tile_size = i64::from(self.tile_size);
        let x = (i64::from(pos.x) - i64::from(self.origin.x)) / tile_size;
        let y = (i64::from(pos.y) - i64::from(self.origin.y)) / tile_size;
        (x as Coord, y as Coord)
    }

    /// Top-left screen position of the tile at `coords`.
    ///
    /// Never overflows, the constructor checks that the far corner fits in `i32`.
    pub fn grid_to_screen(&self, (x, y): Coord2) -> ScreenPos {
        assert!(x < self.size.0 && y < self.size.1, "{:?} is outside the board", (x, y));
        let tile_size = self.tile_size as i32;
        ScreenPos::new(
            self.origin.x + i32::from(x) * tile_size,
            self.origin.y + i32::from(y) * tile_size,
        )
    }
}
