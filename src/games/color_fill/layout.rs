//! Pixel geometry of the Color Fill board.
//!
//! Maps pointer positions to cells and to the Play Again button. Positions
//! that land on nothing map to `None`.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Rect, Vec2};

/// Screen layout in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Offset of the grid's top-left corner on both axes.
    pub padding: u32,
    pub cell_size: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 600,
            padding: 50,
            cell_size: 80,
        }
    }
}

impl Layout {
    /// The cell under pixel `(x, y)` on a `rows x cols` grid.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32, rows: usize, cols: usize) -> Option<Coord> {
        let size = i64::from(self.cell_size);
        if size == 0 {
            return None;
        }
        let dx = i64::from(x) - i64::from(self.padding);
        let dy = i64::from(y) - i64::from(self.padding);
        if dx < 0 || dy < 0 {
            return None;
        }
        let row = i32::try_from(dy / size).ok()?;
        let col = i32::try_from(dx / size).ok()?;
        let at = Coord::new(row, col);
        at.within(rows, cols).then_some(at)
    }

    /// Pixel rectangle of a cell.
    #[must_use]
    pub fn cell_rect(&self, at: Coord) -> Rect {
        let size = self.cell_size as f32;
        Rect::new(
            self.padding as f32 + at.col as f32 * size,
            self.padding as f32 + at.row as f32 * size,
            size,
            size,
        )
    }

    /// The Play Again button shown on the win screen.
    #[must_use]
    pub fn play_again_button(&self) -> Rect {
        let w = self.screen_width as f32;
        let h = self.screen_height as f32;
        Rect::new(w / 2.0 - 100.0, h / 2.0, 200.0, 50.0)
    }

    /// Check whether pixel `(x, y)` is on the Play Again button.
    #[must_use]
    pub fn hits_play_again(&self, x: i32, y: i32) -> bool {
        self.play_again_button().contains(Vec2::new(x as f32, y as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_maps_pixels() {
        let layout = Layout::default();

        assert_eq!(layout.cell_at(50, 50, 5, 5), Some(Coord::new(0, 0)));
        assert_eq!(layout.cell_at(129, 50, 5, 5), Some(Coord::new(0, 0)));
        assert_eq!(layout.cell_at(130, 50, 5, 5), Some(Coord::new(0, 1)));
        assert_eq!(layout.cell_at(449, 449, 5, 5), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_cell_at_outside_grid() {
        let layout = Layout::default();

        assert_eq!(layout.cell_at(10, 10, 5, 5), None);
        assert_eq!(layout.cell_at(450, 100, 5, 5), None);
        assert_eq!(layout.cell_at(-300, -300, 5, 5), None);
    }

    #[test]
    fn test_cell_at_extreme_pixels() {
        let layout = Layout::default();

        assert_eq!(layout.cell_at(i32::MIN, 10, 5, 5), None);
        assert_eq!(layout.cell_at(10, i32::MIN + 10, 5, 5), None);
        assert_eq!(layout.cell_at(i32::MAX, i32::MAX, 5, 5), None);
        assert_eq!(layout.cell_at(i32::MIN, i32::MAX, 5, 5), None);

        let tiny = Layout {
            padding: u32::MAX,
            cell_size: 1,
            ..Layout::default()
        };
        assert_eq!(tiny.cell_at(i32::MAX, i32::MAX, 5, 5), None);
    }

    #[test]
    fn test_cell_rect_roundtrips_through_cell_at() {
        let layout = Layout::default();
        let rect = layout.cell_rect(Coord::new(2, 3));
        let center = rect.center();

        assert_eq!(rect.x, 290.0);
        assert_eq!(rect.y, 210.0);
        assert_eq!(layout.cell_at(center.x as i32, center.y as i32, 5, 5), Some(Coord::new(2, 3)));
    }

    #[test]
    fn test_play_again_button() {
        let layout = Layout::default();

        assert!(layout.hits_play_again(300, 320));
        assert!(!layout.hits_play_again(300, 100));
        assert!(!layout.hits_play_again(150, 320));
    }
}
