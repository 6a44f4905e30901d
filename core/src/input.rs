use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Reveal,
    Flag,
}

/// A click delivered by the host, already resolved to screen coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: ScreenPos,
}

impl PointerEvent {
    pub const fn reveal(pos: ScreenPos) -> Self {
        Self {
            kind: PointerKind::Reveal,
            pos,
        }
    }

    pub const fn flag(pos: ScreenPos) -> Self {
        Self {
            kind: PointerKind::Flag,
            pos,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    Reveal(Coord2, RevealOutcome),
    Flag(Coord2, FlagOutcome),
}

impl PointerOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(_, outcome) => outcome.has_update(),
            Self::Flag(_, outcome) => outcome.has_update(),
        }
    }
}

impl Board {
    /// # Panics
    ///
    /// If `pos` is outside the board as placed by `layout`.
    pub fn on_reveal_click(&mut self, layout: &BoardLayout, pos: ScreenPos) -> RevealOutcome {
        self.reveal_at(layout.screen_to_grid(pos))
    }

    /// # Panics
    ///
    /// If `pos` is outside the board as placed by `layout`.
    pub fn on_flag_click(&mut self, layout: &BoardLayout, pos: ScreenPos) -> FlagOutcome {
        self.toggle_flag_at(layout.screen_to_grid(pos))
    }

    /// Dispatches a click, returns `None` when it landed outside the board.
    pub fn handle_pointer(
        &mut self,
        layout: &BoardLayout,
        event: PointerEvent,
    ) -> Option<PointerOutcome> {
        assert_eq!(layout.size(), self.size(), "layout is for another board");
        if !layout.contains(event.pos) {
            log::trace!("Click at {:?} is outside the board", event.pos);
            return None;
        }

        let coords = layout.screen_to_grid(event.pos);
        Some(match event.kind {
            PointerKind::Reveal => PointerOutcome::Reveal(coords, self.reveal_at(coords)),
            PointerKind::Flag => PointerOutcome::Flag(coords, self.toggle_flag_at(coords)),
        })
    }
}
