//! Board grid layout
//!
//! Provides:
//! - Row-major 4x4 (configurable) grid for the card board
//! - Cursor navigation helpers (up/down/left/right)
//! - Cell geometry for rendering

use ratatui::layout::Rect;

/// Grid layout for the card board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGrid {
    pub columns: u16,
    pub rows: u16,
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 4,
        }
    }
}

impl BoardGrid {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns: columns.clamp(1, 10),
            rows: rows.clamp(1, 10),
        }
    }

    /// Smallest near-square grid that fits `cells`
    pub fn for_cells(cells: usize) -> Self {
        let columns = (cells as f64).sqrt().ceil().max(1.0) as u16;
        let rows = (cells as u16).div_ceil(columns).max(1);
        Self::new(columns, rows)
    }

    /// Convert flat index to (row, col) position.
    /// Row-major ordering:
    /// ```text
    /// Index:  0  1  2  3
    ///         4  5  6  7
    /// ```
    pub fn index_to_position(&self, index: usize) -> (u16, u16) {
        let cols = self.columns as usize;
        ((index / cols) as u16, (index % cols) as u16)
    }

    pub fn position_to_index(&self, row: u16, col: u16) -> usize {
        (row as usize) * (self.columns as usize) + (col as usize)
    }

    /// Move the cursor one cell, staying on the board
    pub fn step(&self, current: usize, direction: Direction, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let (row, col) = self.index_to_position(current);
        let target = match direction {
            Direction::Up if row > 0 => self.position_to_index(row - 1, col),
            Direction::Down => self.position_to_index(row + 1, col),
            Direction::Left if col > 0 => current - 1,
            Direction::Right if col + 1 < self.columns => current + 1,
            _ => current,
        };
        if target < total {
            target
        } else {
            current
        }
    }

    /// Area of the cell at `index` within `area`
    pub fn cell_rect(&self, area: Rect, index: usize) -> Rect {
        let cell_width = area.width / self.columns;
        let cell_height = area.height / self.rows;
        let (row, col) = self.index_to_position(index);
        Rect {
            x: area.x + col * cell_width,
            y: area.y + row * cell_height,
            width: cell_width,
            height: cell_height,
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_cells() {
        assert_eq!(BoardGrid::for_cells(16), BoardGrid::new(4, 4));
        assert_eq!(BoardGrid::for_cells(12), BoardGrid::new(4, 3));
        assert_eq!(BoardGrid::for_cells(0), BoardGrid::new(1, 1));
    }

    #[test]
    fn test_index_to_position() {
        let grid = BoardGrid::default();
        assert_eq!(grid.index_to_position(0), (0, 0));
        assert_eq!(grid.index_to_position(3), (0, 3));
        assert_eq!(grid.index_to_position(4), (1, 0));
        assert_eq!(grid.index_to_position(15), (3, 3));
        assert_eq!(grid.position_to_index(2, 1), 9);
    }

    #[test]
    fn test_navigation() {
        let grid = BoardGrid::default();
        let total = 16;

        assert_eq!(grid.step(5, Direction::Up, total), 1);
        assert_eq!(grid.step(1, Direction::Up, total), 1);
        assert_eq!(grid.step(5, Direction::Down, total), 9);
        assert_eq!(grid.step(13, Direction::Down, total), 13);
        assert_eq!(grid.step(4, Direction::Left, total), 4); // no row wrap
        assert_eq!(grid.step(3, Direction::Right, total), 3);
        assert_eq!(grid.step(6, Direction::Right, total), 7);
    }

    #[test]
    fn test_partial_last_row() {
        let grid = BoardGrid::new(4, 3);
        // 10 cells: last row holds 8, 9
        assert_eq!(grid.step(7, Direction::Down, 10), 7);
        assert_eq!(grid.step(5, Direction::Down, 10), 9);
        assert_eq!(grid.step(9, Direction::Right, 10), 9);
    }

    #[test]
    fn test_cell_rect() {
        let grid = BoardGrid::default();
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(grid.cell_rect(area, 0), Rect::new(0, 0, 10, 5));
        assert_eq!(grid.cell_rect(area, 6), Rect::new(20, 5, 10, 5));
    }
}
