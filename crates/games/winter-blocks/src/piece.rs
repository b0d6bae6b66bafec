/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Filled-cell matrix, row-major, `true` = occupied.
pub type Shape = Vec<Vec<bool>>;

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn color(self) -> &'static str {
        match self {
            PieceKind::I => "#00F0F0",
            PieceKind::O => "#F0F000",
            PieceKind::T => "#A000F0",
            PieceKind::S => "#00F000",
            PieceKind::Z => "#F00000",
            PieceKind::J => "#0000F0",
            PieceKind::L => "#F0A000",
        }
    }

    /// Spawn orientation.
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        rows.iter()
            .map(|row| row.iter().map(|&c| c == 1).collect())
            .collect()
    }
}

/// The falling piece: its kind, current orientation and board position of
/// the shape's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Piece of `kind` centred horizontally at the top of a board.
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let shape_width = shape.first().map_or(0, Vec::len);
        Self {
            kind,
            x: (board_width / 2) as i32 - (shape_width / 2) as i32,
            y: 0,
            shape,
        }
    }

    /// Board coordinates of every filled cell at offset `(dx, dy)`.
    pub fn cells_at(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        shape_cells(&self.shape).map(move |(cx, cy)| (self.x + cx + dx, self.y + cy + dy))
    }
}

/// Local coordinates of every filled cell.
pub fn shape_cells(shape: &Shape) -> impl Iterator<Item = (i32, i32)> + '_ {
    shape.iter().enumerate().flat_map(|(y, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(x, _)| (x as i32, y as i32))
    })
}

/// Rotate 90 degrees clockwise.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let rows = shape.len();
    let cols = shape.first().map_or(0, Vec::len);
    (0..cols)
        .map(|c| (0..rows).map(|r| shape[rows - 1 - r][c]).collect())
        .collect()
}
