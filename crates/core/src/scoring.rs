//! Scoring module - combo and dry-spell bookkeeping
//!
//! Points for a clear are `(rows + bonus) * combo`, where the bonus grows with the
//! number of rows removed at once and the combo counts consecutive scoring locks.
//! A lock that clears nothing after a dry lock breaks the combo.

/// Points awarded by one clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    /// Running total after this clear
    pub score: u32,
    /// Combo after this clear
    pub combo: u32,
    /// Points added by this clear
    pub points: u32,
}

/// Extra rows credited for a multi-row clear (1→0, 2→1, 3→2, 4→3)
pub fn line_bonus(rows: usize) -> u32 {
    rows.saturating_sub(1) as u32
}

/// Points for clearing `rows` rows at the given combo
pub fn calculate_points(rows: usize, combo: u32) -> u32 {
    if rows == 0 {
        return 0;
    }
    (rows as u32 + line_bonus(rows)) * combo
}

/// Auto-drop delay after one speed-up step, never below `floor_ms`
pub fn accelerated_delay_ms(delay_ms: u32, numerator: u32, denominator: u32, floor_ms: u32) -> u32 {
    let scaled = (delay_ms as u64 * numerator as u64) / (denominator.max(1) as u64);
    (scaled as u32).max(floor_ms)
}

/// Score tracker fed by lock and clear notifications
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    combo: u32,
    dryspell: i32,
    score: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Consecutive locks since the last clear
    pub fn dryspell(&self) -> i32 {
        self.dryspell
    }

    /// A piece locked; counted as dry until its clear result arrives
    pub fn on_lock(&mut self) {
        self.dryspell += 1;
    }

    /// Clear result for the lock reported just before
    pub fn on_clear(&mut self, rows: &[usize]) -> ScoreUpdate {
        if rows.is_empty() {
            if self.dryspell > 0 {
                self.combo = 0;
            }
        } else {
            self.dryspell = 0;
            self.combo += 1;
        }

        let points = calculate_points(rows.len(), self.combo);
        self.score += points;

        ScoreUpdate {
            score: self.score,
            combo: self.combo,
            points,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bonus_table() {
        assert_eq!(line_bonus(0), 0);
        assert_eq!(line_bonus(1), 0);
        assert_eq!(line_bonus(2), 1);
        assert_eq!(line_bonus(3), 2);
        assert_eq!(line_bonus(4), 3);
    }

    #[test]
    fn test_points_scale_with_combo() {
        assert_eq!(calculate_points(1, 1), 1);
        assert_eq!(calculate_points(4, 1), 7);
        assert_eq!(calculate_points(2, 3), 9);
        assert_eq!(calculate_points(0, 5), 0);
    }

    #[test]
    fn test_single_then_single_scores_one_then_two() {
        let mut keeper = ScoreKeeper::new();
        keeper.on_lock();
        assert_eq!(
            keeper.on_clear(&[21]),
            ScoreUpdate {
                score: 1,
                combo: 1,
                points: 1
            }
        );
        keeper.on_lock();
        let update = keeper.on_clear(&[21]);
        assert_eq!(update.combo, 2);
        assert_eq!(update.points, 2);
        assert_eq!(update.score, 3);
    }

    #[test]
    fn test_dry_lock_breaks_combo() {
        let mut keeper = ScoreKeeper::new();
        keeper.on_lock();
        keeper.on_clear(&[20, 21]);
        keeper.on_lock();
        let update = keeper.on_clear(&[]);
        assert_eq!(update.combo, 0);
        assert_eq!(update.points, 0);
        assert_eq!(keeper.dryspell(), 1);

        keeper.on_lock();
        assert_eq!(keeper.on_clear(&[21]).combo, 1);
        assert_eq!(keeper.dryspell(), 0);
    }

    #[test]
    fn test_tetris_at_first_combo() {
        let mut keeper = ScoreKeeper::new();
        keeper.on_lock();
        assert_eq!(keeper.on_clear(&[18, 19, 20, 21]).points, 7);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut keeper = ScoreKeeper::new();
        keeper.on_lock();
        keeper.on_clear(&[21]);
        keeper.on_lock();
        keeper.reset();
        assert_eq!(keeper, ScoreKeeper::default());
    }

    #[test]
    fn test_accelerated_delay() {
        assert_eq!(accelerated_delay_ms(300, 99, 100, 50), 297);
        assert_eq!(accelerated_delay_ms(50, 99, 100, 50), 50);
        assert_eq!(accelerated_delay_ms(51, 99, 100, 50), 50);
    }
}
