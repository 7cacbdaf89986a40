use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use glam::Vec2;
use unicode_width::UnicodeWidthStr;

use crate::engine::{Body, Fill, Tag};
use crate::session::GameSession;

/// Terminal columns per raster cell; keeps cells close to square.
const CELL_W: usize = 2;
const HUD_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Boundary,
    Wall,
    Goal,
    Ball,
}

impl Glyph {
    fn for_tag(tag: Tag) -> Self {
        match tag {
            Tag::Boundary => Glyph::Boundary,
            Tag::Wall => Glyph::Wall,
            Tag::Goal => Glyph::Goal,
            Tag::Ball => Glyph::Ball,
        }
    }

    /// Draw order; higher layers cover lower ones.
    fn layer(self) -> u8 {
        match self {
            Glyph::Empty => 0,
            Glyph::Boundary => 1,
            Glyph::Wall => 2,
            Glyph::Goal => 3,
            Glyph::Ball => 4,
        }
    }

    fn text(self) -> &'static str {
        match self {
            Glyph::Empty => " ",
            Glyph::Boundary | Glyph::Wall | Glyph::Goal => "██",
            Glyph::Ball => "●",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub glyph: Glyph,
    pub color: Color,
}

impl Tile {
    const EMPTY: Tile = Tile {
        glyph: Glyph::Empty,
        color: Color::Reset,
    };
}

fn color_for(fill: Fill) -> Color {
    match fill {
        Fill::Red => Color::Red,
        Fill::Green => Color::Green,
        Fill::Blue => Color::Blue,
        Fill::Grey => Color::DarkGrey,
    }
}

/// Projects bodies onto a `cols x rows` character raster covering `world` units.
///
/// Every body that is at least partly on screen covers one or more cells, so walls
/// thinner than a character still show up.
pub fn rasterize(bodies: &[Body], world: Vec2, cols: usize, rows: usize) -> Vec<Tile> {
    let mut tiles = vec![Tile::EMPTY; cols * rows];
    if cols == 0 || rows == 0 {
        return tiles;
    }
    let cell = Vec2::new(world.x / cols as f32, world.y / rows as f32);

    for body in bodies {
        let (min, max) = body.bounds();
        if max.x < 0.0 || max.y < 0.0 || min.x > world.x || min.y > world.y {
            continue;
        }
        let (c0, c1) = span(min.x, max.x, cell.x, cols);
        let (r0, r1) = span(min.y, max.y, cell.y, rows);
        let glyph = Glyph::for_tag(body.tag);
        let tile = Tile {
            glyph,
            color: color_for(body.fill),
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let slot = &mut tiles[row * cols + col];
                if glyph.layer() >= slot.glyph.layer() {
                    *slot = tile;
                }
            }
        }
    }
    tiles
}

fn span(min: f32, max: f32, cell: f32, count: usize) -> (usize, usize) {
    let last = count - 1;
    let first = ((min / cell).floor().max(0.0) as usize).min(last);
    let end = (((max / cell).ceil() as isize - 1).max(0) as usize).min(last);
    (first, end.max(first))
}

pub struct Renderer {
    last: Vec<Tile>,
    last_hud: String,
    needs_full: bool,
    size: (u16, u16),
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            needs_full: true,
            size: (0, 0),
        }
    }

    /// Forces the next frame to repaint every cell.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        bodies: &[Body],
        session: &GameSession,
    ) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.draw(out, bodies, session, (term_w, term_h))
    }

    fn draw<W: Write>(
        &mut self,
        out: &mut W,
        bodies: &[Body],
        session: &GameSession,
        (term_w, term_h): (u16, u16),
    ) -> io::Result<()> {
        if (term_w, term_h) != self.size {
            self.size = (term_w, term_h);
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let config = session.config();
        let (needed_w, needed_h) = needed_size(config.rows, config.cols);
        out.queue(MoveTo(0, 0))?;
        if (term_w as usize) < needed_w || (term_h as usize) < needed_h {
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let hud = hud_line(session);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(0, 0))?;
            out.queue(SetForegroundColor(if session.has_won() {
                Color::Green
            } else {
                Color::White
            }))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let cols = term_w as usize / CELL_W;
        let rows = (term_h - HUD_ROWS) as usize;
        let world = Vec2::new(config.width, config.height);
        let tiles = rasterize(bodies, world, cols, rows);
        if self.last.len() != tiles.len() {
            self.last = vec![Tile::EMPTY; tiles.len()];
            self.needs_full = true;
        }

        for (idx, &tile) in tiles.iter().enumerate() {
            if self.needs_full || tile != self.last[idx] {
                self.last[idx] = tile;
                draw_tile(out, idx % cols, idx / cols, tile)?;
            }
        }
        self.needs_full = false;

        out.flush()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest terminal (columns, rows) that still shows every wall of the maze.
fn needed_size(rows: usize, cols: usize) -> (usize, usize) {
    let width = cols.saturating_mul(2).saturating_add(1).saturating_mul(CELL_W);
    let height = rows
        .saturating_mul(2)
        .saturating_add(1)
        .saturating_add(HUD_ROWS as usize);
    (width, height)
}

fn hud_line(session: &GameSession) -> String {
    let config = session.config();
    if session.has_won() {
        format!(
            "You won!  {}x{} maze  (r for a new maze, q to quit)",
            config.rows, config.cols
        )
    } else {
        format!(
            "Maze {}x{}  (w/a/s/d to roll, r for a new maze, q to quit)",
            config.rows, config.cols
        )
    }
}

fn draw_tile<W: Write>(out: &mut W, x: usize, y: usize, tile: Tile) -> io::Result<()> {
    let text = tile.glyph.text();
    out.queue(MoveTo((x * CELL_W) as u16, y as u16 + HUD_ROWS))?;
    out.queue(SetForegroundColor(tile.color))?;
    out.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            out.queue(Print(' '))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}
