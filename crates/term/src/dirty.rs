//! Dirty-region tracking fed by the game's `Update` events.
//!
//! The binary redraws only when something was marked since the last frame.
//! Marks are clipped to the visible play area; a change confined to the hidden
//! rows does not need a repaint of the board itself.

use crate::core::GameEvent;
use crate::types::{Region, BOARD_WIDTH, HIDDEN_ROWS, VISIBLE_HEIGHT};

const VISIBLE: Region = Region::new(0, HIDDEN_ROWS as i8, BOARD_WIDTH, VISIBLE_HEIGHT);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyRegion {
    board: Option<Region>,
    /// Panel or overlay content changed (score, hold, preview, clock state)
    chrome: bool,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a grid area, clipped to the visible rows
    pub fn mark(&mut self, region: Region) {
        let Some(clipped) = clip(region) else {
            return;
        };
        self.board = Some(match self.board {
            Some(existing) => existing.union(&clipped),
            None => clipped,
        });
    }

    pub fn mark_all(&mut self) {
        self.board = Some(VISIBLE);
        self.chrome = true;
    }

    /// Fold one game event into the dirty state
    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Update(region) => self.mark(*region),
            GameEvent::Spawn(_)
            | GameEvent::Hold { .. }
            | GameEvent::Score { .. }
            | GameEvent::Clock(_) => self.chrome = true,
            _ => {}
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.board.is_some() || self.chrome
    }

    /// Board area marked since the last take
    pub fn board_region(&self) -> Option<Region> {
        self.board
    }

    /// Reset and report whether anything was dirty
    pub fn take(&mut self) -> bool {
        let dirty = self.is_dirty();
        *self = Self::default();
        dirty
    }
}

fn clip(region: Region) -> Option<Region> {
    if region.is_empty() {
        return None;
    }
    let left = (region.x as i16).max(VISIBLE.x as i16);
    let top = (region.y as i16).max(VISIBLE.y as i16);
    let right = region.right().min(VISIBLE.right());
    let bottom = region.bottom().min(VISIBLE.bottom());
    if right <= left || bottom <= top {
        return None;
    }
    Some(Region::new(
        left as i8,
        top as i8,
        (right - left) as u8,
        (bottom - top) as u8,
    ))
}
