//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Scene`.
//! No game logic is performed; this module only maps the 600×600 playfield
//! onto terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::compute::{FIELD_HEIGHT, FIELD_WIDTH};
use space_invaders::view::{Scene, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_SHIP: Color = Color::Rgb { r: 69, g: 190, b: 69 };
const C_ALIEN: Color = Color::White;
const C_SHIELD: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Green;
const C_BULLET_CHARGED: Color = Color::Red;
const C_BULLET_ALIEN: Color = Color::White;
const C_BANNER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Terminal rows reserved above (HUD) and below (hint) the playfield.
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame at the given terminal size.
pub fn render<W: Write>(out: &mut W, scene: &Scene, size: (u16, u16)) -> std::io::Result<()> {
    let (width, height) = size;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, scene)?;

    match scene.banner() {
        Some(text) => draw_banner(out, text, size)?,
        None => {
            let field = Field::new(width, height);
            for (_, sprite) in scene.sprites() {
                draw_sprite(out, &field, sprite)?;
            }
        }
    }

    draw_controls_hint(out, size)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield → cell mapping ──────────────────────────────────────────────────

struct Field {
    cols: u16,
    rows: u16,
}

impl Field {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cols: width.max(1),
            rows: height.saturating_sub(HUD_ROWS + HINT_ROWS).max(1),
        }
    }

    fn col(&self, x: f64) -> Option<u16> {
        let c = (x / FIELD_WIDTH * self.cols as f64).floor();
        (c >= 0.0 && c < self.cols as f64).then_some(c as u16)
    }

    fn row(&self, y: f64) -> Option<u16> {
        let r = (y / FIELD_HEIGHT * self.rows as f64).floor();
        (r >= 0.0 && r < self.rows as f64).then_some(r as u16 + HUD_ROWS)
    }

    /// Cell span of a length along one axis, never less than one cell.
    fn span(&self, len: f64, field_len: f64, cells: u16) -> u16 {
        ((len / field_len * cells as f64).round() as u16).max(1)
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn glyph(kind: SpriteKind) -> (char, Color) {
    match kind {
        SpriteKind::Ship => ('█', C_SHIP),
        SpriteKind::Alien => ('▓', C_ALIEN),
        SpriteKind::Shield => ('█', C_SHIELD),
        SpriteKind::PlayerBullet => ('|', C_BULLET_PLAYER),
        SpriteKind::ChargedBullet => ('┃', C_BULLET_CHARGED),
        SpriteKind::AlienBullet => ('|', C_BULLET_ALIEN),
    }
}

fn draw_sprite<W: Write>(out: &mut W, field: &Field, sprite: &Sprite) -> std::io::Result<()> {
    let (Some(col), Some(row)) = (field.col(sprite.x), field.row(sprite.y)) else {
        return Ok(());
    };
    let (ch, color) = glyph(sprite.kind);
    let w = field.span(sprite.width, FIELD_WIDTH, field.cols).min(field.cols - col);
    let h = field.span(sprite.height, FIELD_HEIGHT, field.rows);
    let last_row = field.rows + HUD_ROWS;

    out.queue(style::SetForegroundColor(color))?;
    let line: String = std::iter::repeat(ch).take(w as usize).collect();
    for dy in 0..h {
        let r = row + dy;
        if r >= last_row {
            break;
        }
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, scene: &Scene) -> std::io::Result<()> {
    let hud = scene.hud();
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(hud.score_text()))?;
    out.queue(Print("   "))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(hud.level_text()))?;
    out.queue(Print("   "))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(hud.lives_text()))?;
    Ok(())
}

// ── Banner & hint ─────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, text: &str, size: (u16, u16)) -> std::io::Result<()> {
    let (width, height) = size;
    let len = text.chars().count() as u16;
    out.queue(cursor::MoveTo(width.saturating_sub(len) / 2, height / 2))?;
    out.queue(style::SetForegroundColor(C_BANNER))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, size: (u16, u16)) -> std::io::Result<()> {
    let (_, height) = size;
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   ↑ : Shoot   ↓ : Next level / Restart   Q : Quit"))?;
    Ok(())
}
