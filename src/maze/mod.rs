//! # Maze World
//!
//! A small grid world used to drive the search engines: a text layout with walls,
//! food, the start of agent 0 and the ghost starts.
//!
//! ```text
//! %%%%%%%
//! %    P%
//! % %%% %
//! %  %  %
//! %%   %%
//! %. %%%%
//! %%%%%%%
//! ```

mod chase;
pub use chase::*;
mod problem;
pub use problem::*;

use std::fmt::{self, Debug};
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Error;

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i16,
    pub y: i16,
}

impl Pos {
    pub const fn new(x: i16, y: i16) -> Pos {
        Pos { x, y }
    }

    pub fn apply(self, d: Direction) -> Pos {
        let (dx, dy) = d.offset();
        Pos::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }
}

/// Parses `x,y`.
impl FromStr for Pos {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
        let x = x.trim().parse().map_err(|e| format!("invalid x: {e}"))?;
        let y = y.trim().parse().map_err(|e| format!("invalid y: {e}"))?;
        Ok(Pos::new(x, y))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four moving directions.
    pub fn iter() -> impl Iterator<Item = Direction> {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
        .into_iter()
    }

    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

/// Errors of malformed layouts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("row {row} has width {width}, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("layout has no start 'P'")]
    MissingStart,
    #[error("layout has more than one start 'P'")]
    DuplicateStart,
    #[error("layout has {0} food cells, at most 64 are supported")]
    TooMuchFood(usize),
}

/// Static maze layout. The origin is the bottom left corner.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    pub width: usize,
    pub height: usize,
    walls: Vec<bool>,
    /// Initial food in row major order from the bottom.
    pub food: Vec<Pos>,
    pub start: Pos,
    pub ghosts: Vec<Pos>,
}

impl Maze {
    /// Parses a layout: `%` wall, `.` food, `P` start, `G` ghost, anything else is free.
    ///
    /// Blank rows are skipped and the indentation shared by all rows is removed,
    /// other whitespace is an open cell.
    pub fn parse(txt: &str) -> Result<Maze, LayoutError> {
        let lines: Vec<&str> = txt
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        let indent = lines
            .iter()
            .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
            .min()
            .unwrap_or(0);
        let rows: Vec<&str> = lines.iter().map(|l| &l[indent..]).collect();

        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).ok_or(LayoutError::Empty)?;

        let mut walls = vec![false; width * height];
        let mut food = Vec::new();
        let mut start = None;
        let mut ghosts = Vec::new();

        // bottom row first
        for (y, row) in rows.iter().rev().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(LayoutError::Ragged {
                    row: height - y - 1,
                    width: row_width,
                    expected: width,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let p = Pos::new(x as _, y as _);
                match c {
                    '%' => walls[y * width + x] = true,
                    '.' => food.push(p),
                    'P' if start.is_some() => return Err(LayoutError::DuplicateStart),
                    'P' => start = Some(p),
                    'G' => ghosts.push(p),
                    _ => {}
                }
            }
        }

        Ok(Maze {
            width,
            height,
            walls,
            food,
            start: start.ok_or(LayoutError::MissingStart)?,
            ghosts,
        })
    }

    /// Loads a layout file.
    pub fn load(path: &Path) -> Result<Maze, Error> {
        let txt = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(Maze::parse(&txt)?)
    }

    /// Returns if `p` is within the boundaries of the maze.
    pub fn has(&self, p: Pos) -> bool {
        0 <= p.x && p.x < self.width as _ && 0 <= p.y && p.y < self.height as _
    }

    /// Within the maze and not a wall.
    pub fn is_free(&self, p: Pos) -> bool {
        self.has(p) && !self[p]
    }

    /// Free neighbors in the order of [`Direction::iter`].
    pub fn neighbors(&self, p: Pos) -> impl Iterator<Item = (Direction, Pos)> + '_ {
        Direction::iter()
            .map(move |d| (d, p.apply(d)))
            .filter(|&(_, n)| self.is_free(n))
    }
}

impl FromStr for Maze {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze::parse(s)
    }
}

/// Wall lookup.
impl Index<Pos> for Maze {
    type Output = bool;

    fn index(&self, p: Pos) -> &Self::Output {
        assert!(self.has(p));
        &self.walls[p.x as usize + p.y as usize * self.width]
    }
}

/// Renders the board top row first with an overlay of agents and food.
pub(crate) fn render(
    f: &mut fmt::Formatter<'_>,
    maze: &Maze,
    pacman: Pos,
    ghosts: &[Pos],
    food: &[Pos],
) -> fmt::Result {
    for y in (0..maze.height as i16).rev() {
        write!(f, "  ")?;
        for x in 0..maze.width as i16 {
            let p = Pos::new(x, y);
            if maze[p] {
                write!(f, "{}", "%".blue())?;
            } else if ghosts.contains(&p) {
                write!(f, "{}", "G".red())?;
            } else if p == pacman {
                write!(f, "{}", "P".yellow())?;
            } else if food.contains(&p) {
                write!(f, "{}", ".".white())?;
            } else {
                write!(f, " ")?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maze {{")?;
        render(f, self, self.start, &self.ghosts, &self.food)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TINY: &str = r#"
        %%%%%%%
        %    P%
        % %%% %
        %  %  %
        %%   %%
        %. %%%%
        %%%%%%%"#;

    #[test]
    fn maze_parse() {
        let maze = Maze::parse(TINY).unwrap();
        println!("{:?}", maze);
        assert_eq!(maze.width, 7);
        assert_eq!(maze.height, 7);
        assert_eq!(maze.start, Pos::new(5, 5));
        assert_eq!(maze.food, vec![Pos::new(1, 1)]);
        assert!(maze.ghosts.is_empty());
        assert!(maze[Pos::new(0, 0)]);
        assert!(!maze[Pos::new(1, 1)]);
        assert!(maze.is_free(Pos::new(4, 5)));
        assert!(!maze.is_free(Pos::new(7, 5)));
        assert!(!maze.is_free(Pos::new(-1, 5)));

        let neighbors: Vec<_> = maze.neighbors(Pos::new(5, 5)).collect();
        assert_eq!(
            neighbors,
            vec![
                (Direction::South, Pos::new(5, 4)),
                (Direction::West, Pos::new(4, 5))
            ]
        );
    }

    #[test]
    fn maze_errors() {
        assert_eq!(Maze::parse("  \n  "), Err(LayoutError::Empty));
        assert_eq!(
            Maze::parse("%%%\n%P\n%%%"),
            Err(LayoutError::Ragged {
                row: 1,
                width: 2,
                expected: 3
            })
        );
        assert_eq!(Maze::parse("%%%\n%.%\n%%%"), Err(LayoutError::MissingStart));
        assert_eq!(Maze::parse("%%%%\n%PP%\n%%%%"), Err(LayoutError::DuplicateStart));
    }

    #[test]
    fn open_border() {
        // the leading and trailing spaces of the middle row are free cells
        let maze = Maze::parse("%%%%\n P. \n%%%%").unwrap();
        assert_eq!(maze.width, 4);
        assert_eq!(maze.start, Pos::new(1, 1));
        assert!(maze.is_free(Pos::new(0, 1)));
        assert!(maze.is_free(Pos::new(3, 1)));

        // only the shared indentation is removed
        let indented = Maze::parse("    %%%%\r\n     P. \r\n    %%%%\r\n").unwrap();
        assert_eq!(indented, maze);
    }

    #[test]
    fn ghosts() {
        let maze: Maze = "%%%%%\n%P G%\n%G..%\n%%%%%".parse().unwrap();
        assert_eq!(maze.ghosts, vec![Pos::new(1, 1), Pos::new(3, 2)]);
        assert_eq!(maze.food, vec![Pos::new(2, 1), Pos::new(3, 1)]);
    }

    #[test]
    fn pos() {
        assert_eq!("3, 4".parse::<Pos>(), Ok(Pos::new(3, 4)));
        assert!("3".parse::<Pos>().is_err());
        assert_eq!(Pos::new(1, 1).manhattan(Pos::new(4, -1)), 5);
        assert_eq!(Pos::new(1, 1).apply(Direction::North), Pos::new(1, 2));
        assert_eq!(Pos::new(1, 1).apply(Direction::Stop), Pos::new(1, 1));
    }
}
