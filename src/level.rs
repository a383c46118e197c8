use thiserror::Error;

/// Built-in layout used when no maze file is configured or the file is unusable.
pub const DEFAULT_MAZE: &str = "\
XXXXXXXXXXXXXXXXXXX
X+...+...+...+...+X
XoXXX.XXX.XXX.XXXoX
X.XXX.XXX.XXX.XXX.X
X+...+...+...+...+X
X.XXX.XXX=XXX.XXX.X
X.XXX.XXX=XXX.XXX.X
X+...+===+===+...+X
X.XXX.XXXXXXX.XXX.X
X.XXX.XXXXXXX.XXX.X
X+...+...+...+...+X
X.XXX.XXX.XXX.XXX.X
XoXXX.XXX.XXX.XXXoX
X+...+...+...+...+X
XXXXXXXXXXXXXXXXXXX
";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Node,
    Path,
    Power,
    Empty,
    Pen,
}

impl Tile {
    pub fn from_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            'X' => Some(Tile::Wall),
            '+' => Some(Tile::Node),
            '.' => Some(Tile::Path),
            'o' => Some(Tile::Power),
            ' ' => Some(Tile::Empty),
            '=' => Some(Tile::Pen),
            _ => None,
        }
    }

    pub fn has_pickup(self) -> bool {
        matches!(self, Tile::Path | Tile::Power)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedGridError {
    #[error("maze grid is empty")]
    Empty,
    #[error("maze row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown maze symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
    #[error("maze grid contains no node cells")]
    NoNodes,
}

/// Rectangular grid of cell types, indexed `[row][col]`.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Tile>>,
}

impl Grid {
    /// Parses maze text: one row per line, blank lines ignored.
    pub fn parse(text: &str) -> Result<Grid, MalformedGridError> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let row_idx = rows.len();
            let mut row = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let tile = Tile::from_symbol(symbol).ok_or(MalformedGridError::UnknownSymbol {
                    row: row_idx,
                    col,
                    symbol,
                })?;
                row.push(tile);
            }
            rows.push(row);
        }
        Grid::from_rows(rows)
    }

    pub fn from_rows(cells: Vec<Vec<Tile>>) -> Result<Grid, MalformedGridError> {
        let width = cells.first().map_or(0, Vec::len);
        if cells.is_empty() || width == 0 {
            return Err(MalformedGridError::Empty);
        }
        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(MalformedGridError::Ragged {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
        }
        Ok(Grid {
            width,
            height: cells.len(),
            cells,
        })
    }

    pub fn default_maze() -> Result<Grid, MalformedGridError> {
        Grid::parse(DEFAULT_MAZE)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, col: usize, row: usize) -> Tile {
        self.cells[row][col]
    }

    /// Tile at a signed coordinate, or `None` outside the grid.
    pub fn tile_at(&self, col: isize, row: isize) -> Option<Tile> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row][col])
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, line)| line.iter().enumerate().map(move |(col, t)| (col, row, *t)))
    }

    pub fn count_pickups(&self) -> usize {
        self.cells().filter(|(_, _, t)| t.has_pickup()).count()
    }
}
