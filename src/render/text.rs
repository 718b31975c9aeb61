//! Plain-text frames.

use std::fmt::Write as _;
use std::io::Write;

use log::warn;
use rustc_hash::FxHashMap;

use crate::core::Coord;
use crate::games::color_fill::{ColorFillSnapshot, ColorIndex, Palette};
use crate::games::wormy::WormySnapshot;
use crate::rules::{GameStatus, RenderSink};

/// Glyph for a Color Fill cell: the swatch initial, `.` when unset.
fn swatch_glyph(palette: &Palette, color: Option<ColorIndex>) -> char {
    match color {
        None => '.',
        Some(color) => palette
            .get(color)
            .and_then(|s| s.name.chars().next())
            .map_or('?', |c| c.to_ascii_uppercase()),
    }
}

/// Draw a Color Fill board with column and row labels.
///
/// ```text
///   0 1
/// 0 R G
/// 1 . R
/// selected: Red
/// ```
#[must_use]
pub fn render_color_fill(snapshot: &ColorFillSnapshot) -> String {
    let mut out = String::from(" ");
    for col in 0..snapshot.cols {
        let _ = write!(out, " {}", col % 10);
    }
    out.push('\n');

    for row in 0..snapshot.rows {
        let _ = write!(out, "{}", row % 10);
        for col in 0..snapshot.cols {
            let color = snapshot.color_at(Coord::new(row as i32, col as i32));
            let _ = write!(out, " {}", swatch_glyph(&snapshot.palette, color));
        }
        out.push('\n');
    }

    let selected = snapshot
        .palette
        .get(snapshot.selected)
        .map_or("?", |s| s.name.as_str());
    let _ = writeln!(out, "selected: {}", selected);
    if snapshot.won {
        out.push_str("solved! press r to play again\n");
    }
    out
}

/// Draw a Wormy board.
///
/// `@` head, `o` body, `%` rival, `r`/`y`/`b` apples, `*` bonus.
#[must_use]
pub fn render_wormy(snapshot: &WormySnapshot) -> String {
    let mut glyphs: FxHashMap<Coord, char> = FxHashMap::default();
    for bonus in &snapshot.bonuses {
        glyphs.insert(bonus.at, '*');
    }
    glyphs.insert(snapshot.red, 'r');
    glyphs.insert(snapshot.yellow, 'y');
    glyphs.insert(snapshot.blue, 'b');
    if let Some(rival) = &snapshot.rival {
        for &segment in rival {
            glyphs.insert(segment, '%');
        }
    }
    for &segment in snapshot.player.iter().skip(1) {
        glyphs.insert(segment, 'o');
    }
    if let Some(&head) = snapshot.player.front() {
        glyphs.insert(head, '@');
    }

    let mut out = String::with_capacity((snapshot.width as usize + 1) * (snapshot.height as usize + 2));
    for row in 0..snapshot.height as i32 {
        for col in 0..snapshot.width as i32 {
            out.push(glyphs.get(&Coord::new(row, col)).copied().unwrap_or('.'));
        }
        out.push('\n');
    }

    let score = snapshot.score;
    let _ = writeln!(
        out,
        "score: {} ({} apples + {} bonus)  speed: {}",
        score.total, score.apples, score.bonus_points, snapshot.speed
    );
    if snapshot.status == GameStatus::GameOver {
        out.push_str("game over\n");
    }
    out
}

/// Writes each snapshot as text to an `io::Write`.
///
/// Write errors are logged and otherwise ignored; a broken pipe never
/// reaches the game.
pub struct TextRenderer<W: Write> {
    out: W,
    frames: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, frame: &str) {
        match self.out.write_all(frame.as_bytes()).and_then(|()| self.out.flush()) {
            Ok(()) => self.frames += 1,
            Err(err) => warn!("failed to write frame: {}", err),
        }
    }
}

impl<W: Write> RenderSink<ColorFillSnapshot> for TextRenderer<W> {
    fn present(&mut self, snapshot: &ColorFillSnapshot) {
        self.emit(&render_color_fill(snapshot));
    }
}

impl<W: Write> RenderSink<WormySnapshot> for TextRenderer<W> {
    fn present(&mut self, snapshot: &WormySnapshot) {
        self.emit(&render_wormy(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::color_fill::{ColorFill, ColorFillConfig};
    use crate::games::wormy::{Wormy, WormyConfig};
    use crate::rules::Game;

    #[test]
    fn test_color_fill_frame() {
        let mut game = ColorFill::new(ColorFillConfig::new().with_grid_size(2));
        game.paint_with(Coord::new(0, 0), ColorIndex(0));
        game.paint_with(Coord::new(0, 1), ColorIndex(1));

        let text = render_color_fill(&game.snapshot());
        assert_eq!(text, "  0 1\n0 R G\n1 . .\nselected: Red\n");
    }

    #[test]
    fn test_color_fill_won_banner() {
        let mut game = ColorFill::new(ColorFillConfig::new().with_grid_size(1));
        game.paint(Coord::new(0, 0));

        let text = render_color_fill(&game.snapshot());
        assert!(text.ends_with("solved! press r to play again\n"));
    }

    #[test]
    fn test_wormy_frame_shape() {
        let game = Wormy::new(WormyConfig::default(), 8);
        let text = render_wormy(&game.snapshot());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 25);
        assert!(lines[..24].iter().all(|l| l.len() == 32));
        let board = lines[..24].concat();
        assert_eq!(board.matches('@').count(), 1);
        assert_eq!(board.matches('o').count(), 2);
        assert!(lines[24].starts_with("score: 0"));
    }

    #[test]
    fn test_renderer_counts_frames() {
        let game = ColorFill::default();
        let mut renderer = TextRenderer::new(Vec::new());

        renderer.present(&game.snapshot());
        renderer.present(&game.snapshot());

        assert_eq!(renderer.frames(), 2);
        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(written.matches("selected: Red").count(), 2);
    }
}
