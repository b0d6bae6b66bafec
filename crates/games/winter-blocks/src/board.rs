use crate::piece::{Piece, PieceKind};

/// Settled cells, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Option<PieceKind>>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.rows.get(y).and_then(|row| row.get(x).copied().flatten())
    }

    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, PieceKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|kind| (x, y, kind)))
        })
    }

    /// Whether `piece` shifted by `(dx, dy)` hits a wall, the floor or a
    /// settled cell. Cells above the top edge are free.
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.cells_at(dx, dy).any(|(x, y)| {
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.rows[y as usize][x as usize].is_some()
        })
    }

    /// Settle `piece` into the board. Cells above the top edge are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells_at(0, 0) {
            if y >= 0
                && let Some(cell) = self
                    .rows
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
            {
                *cell = Some(piece.kind);
            }
        }
    }

    /// Remove every full row, shifting the rest down. Returns rows removed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let before = self.rows.len();
        self.rows.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.rows.len();
        for _ in 0..cleared {
            self.rows.insert(0, vec![None; self.width]);
        }
        cleared as u32
    }

    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: usize, gap: Option<usize>) {
        for (x, cell) in self.rows[y].iter_mut().enumerate() {
            *cell = if Some(x) == gap {
                None
            } else {
                Some(PieceKind::O)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::new(10, 20);
        let piece = Piece::spawn(PieceKind::O, 10);
        assert!(!board.collides(&piece, 0, 0));
        assert!(board.collides(&piece, -5, 0));
        assert!(board.collides(&piece, 5, 0));
        assert!(board.collides(&piece, 0, 19));
        assert!(!board.collides(&piece, 0, 18));
    }

    #[test]
    fn settled_cells_collide() {
        let mut board = Board::new(10, 20);
        board.fill_row_except(19, None);
        let piece = Piece::spawn(PieceKind::O, 10);
        assert!(board.collides(&piece, 0, 18));
        assert!(!board.collides(&piece, 0, 17));
    }

    #[test]
    fn clearing_shifts_rows_down() {
        let mut board = Board::new(4, 4);
        board.fill_row_except(3, None);
        board.fill_row_except(2, Some(1));
        board.fill_row_except(1, None);
        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.height(), 4);
        // The partial row dropped to the bottom, gap intact.
        assert_eq!(board.cell(1, 3), None);
        assert_eq!(board.cell(0, 3), Some(PieceKind::O));
        assert_eq!(board.filled_cells().count(), 3);
    }

    #[test]
    fn merge_ignores_cells_above_top() {
        let mut board = Board::new(10, 20);
        let mut piece = Piece::spawn(PieceKind::T, 10);
        piece.y = -1;
        board.merge(&piece);
        assert_eq!(board.filled_cells().count(), 3);
    }
}
