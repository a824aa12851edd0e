use crossterm::style::{Color, Stylize};

use std::fmt;

use crate::maze::{Coord, Direction, Grid, Maze};

/// One character cell of the rendered picture.
///
/// A `h` x `w` maze is drawn on a `(2h + 1)` x `(2w + 1)` tile grid: maze cells sit at
/// odd coordinates, the tiles between them are walls or passages, and the even-even
/// corners are always walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    /// Part of the solution route, either a cell or the passage between two cells.
    Route,
    Entrance,
    Exit,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: usize = 2;

    pub fn plain(self) -> &'static str {
        match self {
            Tile::Wall => "##",
            Tile::Floor => "  ",
            Tile::Route => "..",
            Tile::Entrance => "S ",
            Tile::Exit => "E ",
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Floor => "  ".with(Color::Reset),
            Tile::Route => "••".with(Color::Yellow),
            Tile::Entrance => "🟩".with(Color::Green),
            Tile::Exit => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Colored glyphs for a terminal.
    #[default]
    Color,
    /// ASCII only, for files and pipes.
    Plain,
}

fn tile_of((row, col): Coord) -> Coord {
    (row * 2 + 1, col * 2 + 1)
}

/// Builds the tile picture of `maze`, with `path` drawn over it if given.
pub fn tiles(maze: &Maze, path: Option<&[Coord]>) -> Grid<Tile> {
    let mut tiles = Grid::new(maze.height() * 2 + 1, maze.width() * 2 + 1, Tile::Wall);

    for coord in maze.coords() {
        let center = tile_of(coord);
        tiles[center] = Tile::Floor;
        for dir in Direction::ALL {
            if maze[coord].has_wall(dir) {
                continue;
            }
            // The tile grid has a one-tile border, so stepping from a cell center never underflows
            if let Some(between) = dir.step(center) {
                tiles[between] = Tile::Floor;
            }
        }
    }

    // Cells outside the maze are skipped, and a passage tile is only drawn between
    // adjacent cells
    if let Some(path) = path.filter(|p| !p.is_empty()) {
        for pair in path.windows(2) {
            if maze.is_in_bounds(pair[0]) {
                tiles[tile_of(pair[0])] = Tile::Route;
            }
            if maze.is_in_bounds(pair[0])
                && maze.is_in_bounds(pair[1])
                && Direction::between(pair[0], pair[1]).is_some()
            {
                let (a, b) = (tile_of(pair[0]), tile_of(pair[1]));
                tiles[((a.0 + b.0) / 2, (a.1 + b.1) / 2)] = Tile::Route;
            }
        }
        if let Some(&last) = path.last().filter(|&&c| maze.is_in_bounds(c)) {
            tiles[tile_of(last)] = Tile::Exit;
        }
        if maze.is_in_bounds(path[0]) {
            tiles[tile_of(path[0])] = Tile::Entrance;
        }
    }

    tiles
}

/// Renders `maze` as text, one line per tile row.
pub fn render(maze: &Maze, path: Option<&[Coord]>, style: RenderStyle) -> String {
    let tiles = tiles(maze, path);
    let mut out = String::with_capacity(tiles.len() * (Tile::WIDTH + 1));
    for row in tiles.rows() {
        for tile in row {
            match style {
                RenderStyle::Color => out.push_str(&tile.to_string()),
                RenderStyle::Plain => out.push_str(tile.plain()),
            }
        }
        out.push('\n');
    }
    out
}
