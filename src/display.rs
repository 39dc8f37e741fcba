//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use hoppers::config::GameConfig;
use hoppers::entities::{GameState, Obstacle, Phase, ScorePopup};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::White;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_HIGH: Color = Color::DarkGrey;
const C_ACTOR: Color = Color::Green;
const C_OBSTACLE: Color = Color::Red;
const C_GAP_GUIDE: Color = Color::DarkYellow;
const C_POPUP: Color = Color::Green;
const C_POPUP_FADING: Color = Color::DarkGreen;
const C_OVERLAY: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Largest grid the playfield is drawn on; terminal cells are about twice as
/// tall as they are wide.
const MAX_FIELD_COLS: u16 = 60;
const MAX_FIELD_ROWS: u16 = 30;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping from playfield units to terminal cells.
///
/// Row 0 is the HUD, row 1 the top border, the field follows, then the
/// bottom border and the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    cols: u16,
    rows: u16,
    unit_w: f64,
    unit_h: f64,
}

impl Viewport {
    pub fn fit(term_cols: u16, term_rows: u16, config: &GameConfig) -> Self {
        let cols = term_cols.saturating_sub(2).clamp(1, MAX_FIELD_COLS);
        let rows = term_rows.saturating_sub(4).clamp(1, MAX_FIELD_ROWS);
        Viewport {
            cols,
            rows,
            unit_w: config.playfield_width / f64::from(cols),
            unit_h: config.playfield_height / f64::from(rows),
        }
    }

    fn left(&self) -> u16 {
        1
    }

    fn top(&self) -> u16 {
        2
    }

    fn centre_col(&self) -> u16 {
        self.left() + self.cols / 2
    }

    /// Field column covering playfield `x`, if on screen.
    fn col_of(&self, x: f64) -> Option<u16> {
        let c = (x / self.unit_w).floor();
        (c >= 0.0 && c < f64::from(self.cols)).then(|| self.left() + c as u16)
    }

    fn row_of(&self, y: f64) -> Option<u16> {
        let r = (y / self.unit_h).floor();
        (r >= 0.0 && r < f64::from(self.rows)).then(|| self.top() + r as u16)
    }

    /// Playfield y at the middle of field row `r`.
    fn row_centre(&self, r: u16) -> f64 {
        (f64::from(r) + 0.5) * self.unit_h
    }

    /// Field columns whose span intersects `[x0, x1]`.
    fn cols_spanning(&self, x0: f64, x1: f64) -> impl Iterator<Item = u16> + '_ {
        (0..self.cols).filter(move |&c| {
            let cx0 = f64::from(c) * self.unit_w;
            cx0 + self.unit_w > x0 && cx0 < x1
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    config: &GameConfig,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, view, state)?;

    for obstacle in &state.obstacles {
        draw_obstacle(out, view, obstacle, config)?;
    }
    draw_actor(out, view, state, config)?;
    for popup in &state.score_popups {
        draw_popup(out, view, popup, config)?;
    }

    match state.phase {
        Phase::Idle => draw_overlay(
            out,
            view,
            &["Hoppers", "Press Space/Up or Click to start"],
        )?,
        Phase::GameOver => {
            let score_line = format!("Score: {}", state.display_score());
            draw_overlay(
                out,
                view,
                &[
                    "Game Over!",
                    score_line.as_str(),
                    "Press Space/Up or Click to restart",
                ],
            )?;
        }
        Phase::Playing => {}
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.top() + view.rows + 1))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = view.top() + view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, view.top() - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in view.top()..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.left() + view.cols, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let title = "Hoppers";
    out.queue(cursor::MoveTo(
        view.centre_col().saturating_sub(title.len() as u16 / 2),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if state.phase != Phase::Playing {
        return Ok(());
    }

    out.queue(cursor::MoveTo(view.left(), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("HI: {}", state.high_score)))?;

    let score = state.display_score().to_string();
    out.queue(cursor::MoveTo(
        (view.left() + view.cols).saturating_sub(score.len() as u16),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(score))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_obstacle<W: Write>(
    out: &mut W,
    view: &Viewport,
    obstacle: &Obstacle,
    config: &GameConfig,
) -> std::io::Result<()> {
    let gap_bottom = obstacle.gap_top + config.gap_height;
    let guide_top = view.row_of(obstacle.gap_top);
    let guide_bottom = view.row_of(gap_bottom);

    for c in view.cols_spanning(obstacle.x, obstacle.x + config.obstacle_width) {
        let col = view.left() + c;
        for r in 0..view.rows {
            let row = view.top() + r;
            let y = view.row_centre(r);
            out.queue(cursor::MoveTo(col, row))?;
            if y < obstacle.gap_top || y > gap_bottom {
                out.queue(style::SetForegroundColor(C_OBSTACLE))?;
                out.queue(Print("█"))?;
            } else if Some(row) == guide_top || Some(row) == guide_bottom {
                out.queue(style::SetForegroundColor(C_GAP_GUIDE))?;
                out.queue(Print("╌"))?;
            }
        }
    }
    Ok(())
}

fn draw_actor<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    config: &GameConfig,
) -> std::io::Result<()> {
    // Nose leans with the velocity.
    let nose = match state.velocity_y {
        v if v < -1.0 => "▲",
        v if v > 3.0 => "▼",
        _ => "▶",
    };
    let cols: Vec<u16> = view
        .cols_spanning(config.actor_x, config.actor_x + config.actor_size)
        .collect();
    let first_row = view.row_of(state.actor_y);
    let last_row = view.row_of(state.actor_y + config.actor_size - f64::EPSILON);

    out.queue(style::SetForegroundColor(C_ACTOR))?;
    if let (Some(first), Some(last)) = (first_row, last_row) {
        for row in first..=last {
            for (i, &c) in cols.iter().enumerate() {
                out.queue(cursor::MoveTo(view.left() + c, row))?;
                let mid = row == first + (last - first) / 2;
                if mid && i + 1 == cols.len() {
                    out.queue(Print(nose))?;
                } else {
                    out.queue(Print("●"))?;
                }
            }
        }
    }
    Ok(())
}

fn draw_popup<W: Write>(
    out: &mut W,
    view: &Viewport,
    popup: &ScorePopup,
    config: &GameConfig,
) -> std::io::Result<()> {
    if let (Some(col), Some(row)) = (view.col_of(popup.x), view.row_of(popup.y)) {
        let color = if popup.opacity > 0.5 {
            C_POPUP
        } else {
            C_POPUP_FADING
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("+{}", config.pass_bonus)))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, view: &Viewport, lines: &[&str]) -> std::io::Result<()> {
    let cx = view.centre_col();
    let start_row = (view.top() + view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(C_OVERLAY))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.top() + view.rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ / Click : Hop   Q : Quit"))?;
    Ok(())
}
