//! Diffing terminal renderer. Only cells that changed since the last frame
//! are redrawn.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{Pos, Tile};
use crate::constants::{FIRST_ROUND, LAST_ROUND};
use crate::game::{Game, Phase};
use crate::ghost::{Pursuer, PursuerKind};

const CELL_W: usize = 2;
/// Mouth angle at which the open-mouth glyph is shown.
const MOUTH_OPEN_DEGREES: i32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    PlayerOpen,
    PlayerClosed,
    Pursuer,
    Frightened,
    Wall,
    Spawn,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    glyph: Glyph,
    color: Color,
}

impl Cell {
    const fn new(glyph: Glyph, color: Color) -> Self {
        Self { glyph, color }
    }
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_footer: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![Cell::new(Glyph::Empty, Color::Reset); width * height],
            last_hud: String::new(),
            last_footer: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to redraw everything.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn draw(&mut self, out: &mut impl Write, game: &Game) -> io::Result<()> {
        let Some(maze) = game.maze() else {
            return Ok(());
        };
        let (width, height) = (maze.width(), maze.height());
        if self.last.len() != width * height {
            *self = Self::new(width, height);
        }

        let needed_h = (height + 2) as u16;
        let needed_w = (width * CELL_W) as u16;
        out.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {needed_w}x{needed_h} (cols x rows). Current: {term_w}x{term_h}."
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(game);
        if self.needs_full || hud != self.last_hud {
            self.print_line(out, self.origin_y - 1, Color::White, &hud)?;
            self.last_hud = hud;
        }

        let cells = frame(game);
        for (idx, cell) in cells.into_iter().enumerate() {
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(out, idx % width, idx / width, cell)?;
            }
        }

        let footer = footer_line(game);
        if self.needs_full || footer != self.last_footer {
            self.print_line(out, self.origin_y + height as u16, Color::Yellow, &footer)?;
            self.last_footer = footer;
        }
        self.needs_full = false;

        out.flush()
    }

    fn print_line(&self, out: &mut impl Write, y: u16, color: Color, text: &str) -> io::Result<()> {
        out.queue(MoveTo(self.origin_x, y))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        out.queue(SetForegroundColor(color))?;
        out.queue(Print(text))?;
        out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(&self, out: &mut impl Write, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::PlayerOpen => "😮",
            Glyph::PlayerClosed => "😃",
            Glyph::Pursuer => "👻",
            Glyph::Frightened => "😱",
            Glyph::Wall => "██",
            Glyph::Spawn => "--",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
        };
        out.queue(MoveTo(
            self.origin_x + (x * CELL_W) as u16,
            self.origin_y + y as u16,
        ))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

fn hud_line(game: &Game) -> String {
    let pellets = game.maze().map_or(0, |maze| maze.pellets_left());
    format!(
        "Score: {}  Round: {}  Pellets: {}  Pursuers: {}  (q to quit)",
        game.score(),
        game.round(),
        pellets,
        game.pursuers().iter().filter(|p| p.is_active()).count()
    )
}

fn footer_line(game: &Game) -> String {
    match game.phase() {
        Phase::Menu => format!(
            "Round {} of {}-{}: +/- or digit to choose, Enter to start",
            game.round(),
            FIRST_ROUND,
            LAST_ROUND
        ),
        Phase::Playing => String::new(),
        Phase::Win => format!(
            "ROUND CLEARED - Score: {} (Enter for next round, m for menu)",
            game.score()
        ),
        Phase::GameOver => format!(
            "GAME OVER - Final Score: {} (Enter to retry, m for menu)",
            game.score()
        ),
    }
}

/// Composes the full board, agents drawn over tiles.
pub fn frame(game: &Game) -> Vec<Cell> {
    let Some(maze) = game.maze() else {
        return Vec::new();
    };
    let (width, height) = (maze.width(), maze.height());
    let mut cells: Vec<Cell> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Pos::new(x, y)))
        .map(|pos| tile_cell(maze.tile(pos)))
        .collect();

    if game.phase() == Phase::Menu {
        return cells;
    }

    for pursuer in game.pursuers().iter().filter(|p| p.is_active()) {
        let at = pursuer.screen().to_pos(width, height);
        cells[at.y * width + at.x] = pursuer_cell(pursuer);
    }

    let player = game.player();
    let at = player.screen().to_pos(width, height);
    let glyph = if player.mouth_angle() >= MOUTH_OPEN_DEGREES {
        Glyph::PlayerOpen
    } else {
        Glyph::PlayerClosed
    };
    cells[at.y * width + at.x] = Cell::new(glyph, Color::Yellow);
    cells
}

fn tile_cell(tile: Tile) -> Cell {
    match tile {
        Tile::Wall => Cell::new(Glyph::Wall, Color::Blue),
        Tile::Spawn => Cell::new(Glyph::Spawn, Color::Cyan),
        Tile::Empty => Cell::new(Glyph::Empty, Color::Reset),
        Tile::Pellet => Cell::new(Glyph::Pellet, Color::White),
        Tile::Power => Cell::new(Glyph::Power, Color::Magenta),
    }
}

fn pursuer_cell(pursuer: &Pursuer) -> Cell {
    if pursuer.is_frightened() {
        return Cell::new(Glyph::Frightened, Color::Blue);
    }
    let color = match pursuer.kind() {
        PursuerKind::Chaser => Color::Red,
        PursuerKind::AggressiveChaser => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        PursuerKind::Ambusher => Color::Rgb {
            r: 255,
            g: 182,
            b: 193,
        },
        PursuerKind::RandomPatrol => Color::Cyan,
        PursuerKind::IntersectionRandom => Color::Yellow,
    };
    Cell::new(Glyph::Pursuer, color)
}
