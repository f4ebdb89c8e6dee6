//! Fixed-size toroidal board of binary cells.

use crate::error::BoardError;

/// Intensity at or above which a cell read from a non-binary source is alive.
pub const ALIVE_THRESHOLD: f32 = 0.5;

/// A W x H grid of cells stored row-major (`index = y * width + x`).
///
/// Coordinates passed to [`Board::get`] wrap around both axes, so the board
/// behaves as the surface of a torus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Creates an all-dead board.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let len = Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Creates a board from a row-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, BoardError> {
        let expected = Self::check_dimensions(width, height)?;
        if cells.len() != expected {
            return Err(BoardError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Creates a board from normalized intensities, thresholding at 0.5.
    pub fn from_intensity(width: usize, height: usize, values: &[f32]) -> Result<Self, BoardError> {
        let cells = values.iter().map(|&v| v >= ALIVE_THRESHOLD).collect();
        Self::from_cells(width, height, cells)
    }

    /// Creates a board from 8-bit luminance, thresholding at half intensity.
    pub fn from_luminance(width: usize, height: usize, values: &[u8]) -> Result<Self, BoardError> {
        let cells = values
            .iter()
            .map(|&v| v as f32 / 255.0 >= ALIVE_THRESHOLD)
            .collect();
        Self::from_cells(width, height, cells)
    }

    /// Parses rows of `#` (alive) and `.` (dead). All rows must share one width.
    pub fn from_pattern(rows: &[&str]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let len = Self::check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(len);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::InvalidPattern(format!(
                    "row {} has width {}, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, byte) in row.bytes().enumerate() {
                cells.push(match byte {
                    b'#' => true,
                    b'.' => false,
                    other => {
                        return Err(BoardError::InvalidPattern(format!(
                            "unexpected {:?} at ({}, {})",
                            other as char, x, y
                        )))
                    }
                });
            }
        }
        Ok(Self { width, height, cells })
    }

    /// Validates the dimensions and returns the cell count.
    fn check_dimensions(width: usize, height: usize) -> Result<usize, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        // Signed wrapping in `get`/`set` needs every index to fit in an isize.
        width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(BoardError::TooLarge { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Reads the cell at signed coordinates, wrapping modulo the dimensions.
    pub fn get(&self, x: isize, y: isize) -> bool {
        let wx = x.rem_euclid(self.width as isize) as usize;
        let wy = y.rem_euclid(self.height as isize) as usize;
        self.cells[wy * self.width + wx]
    }

    /// Sets the cell at signed coordinates, wrapping modulo the dimensions.
    pub fn set(&mut self, x: isize, y: isize, alive: bool) {
        let wx = x.rem_euclid(self.width as isize) as usize;
        let wy = y.rem_euclid(self.height as isize) as usize;
        self.cells[wy * self.width + wx] = alive;
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major intensities, 1.0 for alive and 0.0 for dead.
    pub fn to_intensity(&self) -> Vec<f32> {
        self.cells.iter().map(|&c| if c { 1.0 } else { 0.0 }).collect()
    }

    /// Row-major 8-bit luminance, 255 for alive and 0 for dead.
    pub fn to_luminance(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| if c { 255 } else { 0 }).collect()
    }

    /// Overwrites this board with `other`. Dimensions must match.
    pub fn copy_from(&mut self, other: &Board) -> Result<(), BoardError> {
        if self.dimensions() != other.dimensions() {
            return Err(BoardError::DimensionMismatch {
                src_width: other.width,
                src_height: other.height,
                dst_width: self.width,
                dst_height: self.height,
            });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Board::new(0, 4).unwrap_err();
        assert_eq!(err, BoardError::InvalidDimensions { width: 0, height: 4 });
        assert!(err.to_string().contains("0x4"));

        assert!(matches!(
            Board::new(4, 0),
            Err(BoardError::InvalidDimensions { width: 4, height: 0 })
        ));
        assert!(Board::from_cells(0, 0, Vec::new()).is_err());
        assert!(Board::from_pattern(&[]).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let err = Board::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            BoardError::TooLarge {
                width: usize::MAX,
                height: 2
            }
        );
        assert!(err.to_string().contains("too many cells"));

        assert!(matches!(
            Board::from_cells(usize::MAX / 2, 3, Vec::new()),
            Err(BoardError::TooLarge { .. })
        ));
        assert!(matches!(
            Board::new(isize::MAX as usize, 2),
            Err(BoardError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Board::from_cells(2, 2, vec![true; 3]).unwrap_err();
        assert_eq!(err, BoardError::LengthMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn test_intensity_threshold() {
        let board = Board::from_intensity(4, 1, &[0.0, 0.49, 0.5, 0.9]).unwrap();
        assert_eq!(board.cells(), &[false, false, true, true]);
        assert_eq!(board.to_intensity(), vec![0.0, 0.0, 1.0, 1.0]);

        let board = Board::from_luminance(3, 1, &[0, 127, 128]).unwrap();
        assert_eq!(board.cells(), &[false, false, true]);
        assert_eq!(board.to_luminance(), vec![0, 0, 255]);
    }

    #[test]
    fn test_wrapping_access() {
        let mut board = Board::new(3, 2).unwrap();
        board.set(-1, -1, true);
        assert!(board.get(2, 1));
        assert!(board.get(5, 3));
        assert_eq!(board.population(), 1);
        assert!(board.cells()[5]);
    }

    #[test]
    fn test_pattern_parsing() {
        let board = Board::from_pattern(&["#..", ".#.", "..#"]).unwrap();
        assert_eq!(board.dimensions(), (3, 3));
        assert!(board.get(0, 0) && board.get(1, 1) && board.get(2, 2));
        assert_eq!(board.population(), 3);

        assert!(matches!(
            Board::from_pattern(&["##", "#"]),
            Err(BoardError::InvalidPattern(_))
        ));
        assert!(matches!(
            Board::from_pattern(&["#x"]),
            Err(BoardError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_copy_from_checks_dimensions() {
        let src = Board::from_pattern(&["#.", ".#"]).unwrap();
        let mut dst = Board::new(2, 2).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut wrong = Board::new(3, 2).unwrap();
        assert!(matches!(
            wrong.copy_from(&src),
            Err(BoardError::DimensionMismatch { .. })
        ));
    }
}
