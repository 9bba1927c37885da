use thiserror::Error;

use crate::protocol::Player;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Cell ({column}, {row}) is outside the board")]
    OutOfBounds { column: usize, row: usize },
}

/// Local mirror of the server's board.
///
/// Placement is taken on trust: the server owns the rules, so a cell may be
/// overwritten if the server says so.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Player>; ROWS]; COLUMNS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the cell at (column, row) as occupied by `player`.
    pub fn place(&mut self, player: Player, column: usize, row: usize) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(column)
            .and_then(|col| col.get_mut(row))
            .ok_or(BoardError::OutOfBounds { column, row })?;
        *cell = Some(player);
        Ok(())
    }

    pub fn get(&self, column: usize, row: usize) -> Option<Player> {
        self.cells
            .get(column)
            .and_then(|col| col.get(row))
            .copied()
            .flatten()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_marks_cell() {
        let mut board = Board::new();
        board.place(Player::One, 2, 0).unwrap();

        assert_eq!(board.get(2, 0), Some(Player::One));
        assert_eq!(board.get(2, 1), None);
        assert_eq!(board.occupied(), 1);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.place(Player::Two, COLUMNS, 0),
            Err(BoardError::OutOfBounds { column: COLUMNS, row: 0 })
        );
        assert_eq!(
            board.place(Player::Two, 0, ROWS),
            Err(BoardError::OutOfBounds { column: 0, row: ROWS })
        );
        assert_eq!(board.occupied(), 0);
    }

    #[test]
    fn test_server_may_overwrite() {
        let mut board = Board::new();
        board.place(Player::One, 0, 5).unwrap();
        board.place(Player::Two, 0, 5).unwrap();
        assert_eq!(board.get(0, 5), Some(Player::Two));
    }
}
