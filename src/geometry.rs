use Direction::*;

/// A grid position. Negative values only exist transiently before wrapping.
pub type Cell = (i32, i32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Right, Down, Left];

    /// Unit displacement for one step in this direction. The y axis grows downwards.
    pub fn vector(self) -> Cell {
        match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }
}

pub fn add_vectors(a: Cell, b: Cell) -> Cell {
    (a.0 + b.0, a.1 + b.1)
}

/// Size of the toroidal playing field, in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct World {
    pub width: i32,
    pub height: i32,
}

impl World {
    pub fn new(width: i32, height: i32) -> Self {
        World { width: width.max(1), height: height.max(1) }
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        (cell.0.rem_euclid(self.width), cell.1.rem_euclid(self.height))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.0) && (0..self.height).contains(&cell.1)
    }

    pub fn center(&self) -> Cell {
        (self.width / 2, self.height / 2)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
