use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::PickupKind;
use crate::game::{Game, Phase};
use crate::ghost::{GhostKind, GhostMode};
use crate::level::Tile;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Player,
    Ghost,
    Frightened,
    Eaten,
    Wall,
    Empty,
    Pellet,
    Power,
    Pen,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    };
}

/// Diffing terminal renderer: only cells that changed since the last frame
/// are redrawn, unless the layout moved.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_message: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![Cell::BLANK; width * height],
            last_hud: String::new(),
            last_message: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, out: &mut impl Write, game: &Game) -> io::Result<()> {
        let grid = game.grid();
        let (width, height) = (grid.width(), grid.height());
        let needed_h = (height + 3) as u16;
        let needed_w = (width * CELL_W) as u16;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
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
            if self.needs_full || self.last.get(idx) != Some(&cell) {
                if let Some(slot) = self.last.get_mut(idx) {
                    *slot = cell;
                }
                self.draw_cell(out, idx % width, idx / width, cell)?;
            }
        }

        let message = message_line(game);
        if self.needs_full || message != self.last_message {
            self.print_line(out, self.origin_y + height as u16, Color::Yellow, &message)?;
            self.last_message = message;
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
            Glyph::Player => "😃",
            Glyph::Ghost => "ᗣ",
            Glyph::Frightened => "ᗣ",
            Glyph::Eaten => "ºº",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
            Glyph::Pen => "==",
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

/// Builds the full cell buffer, row-major: maze tiles, then pickups, then
/// ghosts, then the player on top.
pub fn frame(game: &Game) -> Vec<Cell> {
    let grid = game.grid();
    let graph = game.graph();
    let width = grid.width();
    let mut cells: Vec<Cell> = grid.cells().map(|(_, _, tile)| tile_cell(tile)).collect();

    let mut put = |col: isize, row: isize, cell: Cell| {
        if col < 0 || row < 0 || col as usize >= width {
            return;
        }
        if let Some(slot) = cells.get_mut(row as usize * width + col as usize) {
            *slot = cell;
        }
    };

    for pickup in game.pellets().items().iter().filter(|p| !p.consumed) {
        let (col, row) = graph.cell_of(pickup.position);
        let cell = match pickup.kind {
            PickupKind::Normal => Cell {
                glyph: Glyph::Pellet,
                color: Color::White,
            },
            PickupKind::Power => Cell {
                glyph: Glyph::Power,
                color: Color::Magenta,
            },
        };
        put(col, row, cell);
    }

    for ghost in game.ghosts().ghosts() {
        let (col, row) = graph.cell_of(ghost.position());
        let cell = match ghost.mode {
            GhostMode::Frightened => Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            GhostMode::Eaten => Cell {
                glyph: Glyph::Eaten,
                color: Color::White,
            },
            GhostMode::Chase | GhostMode::Scatter => Cell {
                glyph: Glyph::Ghost,
                color: ghost_color(ghost.kind),
            },
        };
        put(col, row, cell);
    }

    let (col, row) = graph.cell_of(game.player().position());
    put(
        col,
        row,
        Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        },
    );
    cells
}

fn tile_cell(tile: Tile) -> Cell {
    match tile {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Pen => Cell {
            glyph: Glyph::Pen,
            color: Color::Cyan,
        },
        Tile::Node | Tile::Path | Tile::Power | Tile::Empty => Cell::BLANK,
    }
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Blinky => Color::Red,
        GhostKind::Pinky => Color::Magenta,
        GhostKind::Inky => Color::Cyan,
        GhostKind::Clyde => Color::DarkYellow,
    }
}

fn hud_line(game: &Game) -> String {
    let timeline = game.ghosts().timeline();
    let mode = if timeline.is_frightened() {
        format!("Frightened {:.0}s", timeline.frightened_remaining().ceil())
    } else {
        format!("{:?}", timeline.mode())
    };
    format!(
        "Score: {}  Lives: {}  Level: {}  Pellets: {}  Ghosts: {}",
        game.score(),
        game.lives(),
        game.level(),
        game.pellets().remaining(),
        mode
    )
}

fn message_line(game: &Game) -> String {
    match game.phase() {
        Phase::Ready => "Press space to start (arrows/hjkl move, p pause, q quit)".to_string(),
        Phase::Playing => String::new(),
        Phase::Paused => "Paused - press p to resume".to_string(),
        Phase::Dying { .. } => "Caught!".to_string(),
        Phase::GameOver => format!(
            "GAME OVER - Final Score: {} (space to restart, q to quit)",
            game.score()
        ),
    }
}
