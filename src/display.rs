/// Rendering layer — all terminal I/O lives here.
///
/// The terminal is a viewport onto the world: a cell shows an entity when
/// any opaque pixel of that entity's mask falls inside it.  No game logic is
/// performed; this module only translates state into terminal commands.

use std::io::Write;
use std::ops::Range;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flappy_bird::compute::GAME_OVER_LABEL;
use flappy_bird::config::Config;
use flappy_bird::entities::{Body, Entity, GameStatus, Session};
use flappy_bird::mask::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::DarkCyan;
const C_BIRD: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_GRASS: Color = Color::DarkGreen;
const C_DIRT_LIGHT: Color = Color::Yellow;
const C_DIRT_DARK: Color = Color::DarkYellow;
const C_SCORE: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Width in world pixels of one stripe of the floor pattern.
const FLOOR_STRIPE: i32 = 20;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the `cols` × `rows` terminal cells onto the whole world.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: i32,
    world_h: i32,
}

impl Viewport {
    /// World-pixel area covered by a cell.
    fn cell_rect(&self, col: u16, row: u16) -> Rect {
        let x0 = col as i64 * self.world_w as i64 / self.cols as i64;
        let x1 = (col as i64 + 1) * self.world_w as i64 / self.cols as i64;
        let y0 = row as i64 * self.world_h as i64 / self.rows as i64;
        let y1 = (row as i64 + 1) * self.world_h as i64 / self.rows as i64;
        Rect::new(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32)
    }

    /// Cells overlapping `[from, to)` along one axis.
    fn span(from: i32, to: i32, world: i32, cells: u16) -> Range<u16> {
        let cells_i = cells as i64;
        let start = (from as i64 * cells_i).div_euclid(world as i64).clamp(0, cells_i);
        let end = (to as i64 * cells_i + world as i64 - 1)
            .div_euclid(world as i64)
            .clamp(0, cells_i);
        start as u16..end as u16
    }

    fn cols_for(&self, body: &Body) -> Range<u16> {
        Viewport::span(body.rect.x, body.rect.right(), self.world_w, self.cols)
    }

    fn rows_for(&self, body: &Body) -> Range<u16> {
        Viewport::span(body.rect.y, body.rect.bottom(), self.world_h, self.rows)
    }
}

/// Any opaque pixel of `body` inside `cell`.
fn covers(body: &Body, cell: &Rect) -> bool {
    let Some(area) = body.rect.intersection(cell) else {
        return false;
    };
    (area.y..area.bottom()).any(|y| {
        (area.x..area.right()).any(|x| body.mask.get(x - body.rect.x, y - body.rect.y))
    })
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width` × `height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &Session,
    config: &Config,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Bottom row is reserved for the controls hint.
    let view = Viewport {
        cols: width.max(1),
        rows: height.saturating_sub(1).max(1),
        world_w: config.screen_width,
        world_h: config.screen_height,
    };

    // Everything above the hint row is drawn over the sky.
    draw_sky(out, &view)?;
    for entity in state.entities() {
        draw_entity(out, &view, entity)?;
    }

    match state.status {
        GameStatus::Playing => draw_score(out, state, width)?,
        GameStatus::GameOver => draw_game_over(out, state, width, view.rows)?,
    }
    out.queue(style::ResetColor)?;
    draw_controls_hint(out, state, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_sky<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_SKY))?;
    let blank = " ".repeat(view.cols as usize);
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, view: &Viewport, entity: Entity<'_>) -> std::io::Result<()> {
    let body = entity.body();
    if body.mask.is_empty() {
        return Ok(());
    }

    for row in view.rows_for(body) {
        for col in view.cols_for(body) {
            let cell = view.cell_rect(col, row);
            if !covers(body, &cell) {
                continue;
            }
            let (lx, ly) = ((cell.x - body.rect.x).max(0), cell.y - body.rect.y);
            let (glyph, color) = match entity {
                Entity::Bird(_) => ("█", C_BIRD),
                Entity::Pipe(_) => ("█", C_PIPE),
                // Grass on top, then stripes anchored to the floor so the
                // pattern scrolls with it.
                Entity::Floor(_) if ly < body.rect.h / 6 => ("▀", C_GRASS),
                Entity::Floor(_) if (lx / FLOOR_STRIPE) % 2 == 0 => ("▓", C_DIRT_DARK),
                Entity::Floor(_) => ("▒", C_DIRT_LIGHT),
            };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_score<W: Write>(out: &mut W, state: &Session, width: u16) -> std::io::Result<()> {
    let text = state.score_text();
    let col = width.saturating_sub(text.chars().count() as u16 + 2);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, state: &Session, height: u16) -> std::io::Result<()> {
    let hint = match state.status {
        GameStatus::Playing => "↑ / SPACE : Flap   Q : Quit",
        GameStatus::GameOver => "↑ / SPACE : Play Again   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &Session,
    width: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score = state.score_text();
    let cx = width / 2;
    let cy = rows / 2;

    let lines: [(&str, Color, u16); 2] = [
        (GAME_OVER_LABEL, C_GAME_OVER, cy.saturating_sub(1)),
        (score.as_str(), C_SCORE, cy + 1),
    ];
    for (msg, color, row) in lines {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}
