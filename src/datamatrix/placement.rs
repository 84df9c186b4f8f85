//! ECC200 module placement (ISO/IEC 16022 Annex F).
//!
//! Codewords map onto the data region as 8-module shapes. Most are the
//! L-shaped "utah" nominal shape; four special corner shapes appear at
//! fixed trigger points of the diagonal walk. Each shape names its
//! eight module positions explicitly, most significant bit first, so
//! the tables can be audited against the standard line by line.

use super::tables::SymbolSize;
use crate::grid::{Module, ModuleGrid};

/// A codeword's footprint in the data region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Nominal shape anchored at its bit-8 module `(row, col)`.
    /// Modules that fall off an edge wrap to the opposite side with
    /// the Annex F skew.
    Utah { row: i32, col: i32 },
    Corner1,
    Corner2,
    Corner3,
    Corner4,
}

/// Wrap one nominal-shape module into the data region. Falling off the
/// top shifts right by the row skew, falling off the left shifts down
/// by the column skew.
fn wrap(nrow: i32, ncol: i32, mut row: i32, mut col: i32) -> (usize, usize) {
    if row < 0 {
        row += nrow;
        col += 4 - (nrow + 4) % 8;
    }
    if col < 0 {
        col += ncol;
        row += 4 - (ncol + 4) % 8;
    }
    (row as usize, col as usize)
}

impl Shape {
    /// The eight module positions, ordered bit 1 (MSB) through bit 8.
    pub fn offsets(&self, nrow: i32, ncol: i32) -> [(usize, usize); 8] {
        let n = (nrow - 1) as usize;
        let m = (ncol - 1) as usize;
        match *self {
            Shape::Utah { row: r, col: c } => [
                wrap(nrow, ncol, r - 2, c - 2),
                wrap(nrow, ncol, r - 2, c - 1),
                wrap(nrow, ncol, r - 1, c - 2),
                wrap(nrow, ncol, r - 1, c - 1),
                wrap(nrow, ncol, r - 1, c),
                wrap(nrow, ncol, r, c - 2),
                wrap(nrow, ncol, r, c - 1),
                wrap(nrow, ncol, r, c),
            ],
            Shape::Corner1 => [
                (n, 0),
                (n, 1),
                (n, 2),
                (0, m - 1),
                (0, m),
                (1, m),
                (2, m),
                (3, m),
            ],
            Shape::Corner2 => [
                (n - 2, 0),
                (n - 1, 0),
                (n, 0),
                (0, m - 3),
                (0, m - 2),
                (0, m - 1),
                (0, m),
                (1, m),
            ],
            Shape::Corner3 => [
                (n - 2, 0),
                (n - 1, 0),
                (n, 0),
                (0, m - 1),
                (0, m),
                (1, m),
                (2, m),
                (3, m),
            ],
            Shape::Corner4 => [
                (n, 0),
                (n, m),
                (0, m - 2),
                (0, m - 1),
                (0, m),
                (1, m - 2),
                (1, m - 1),
                (1, m),
            ],
        }
    }
}

/// The Annex F walk: the sequence of shapes, one per codeword, for a
/// `nrow` x `ncol` data region.
pub fn shape_sequence(nrow: i32, ncol: i32) -> Vec<Shape> {
    let mut occupied = vec![false; (nrow * ncol) as usize];
    let mut shapes = Vec::new();
    let claim = |shapes: &mut Vec<Shape>, occupied: &mut Vec<bool>, s: Shape| {
        for (r, c) in s.offsets(nrow, ncol) {
            occupied[r * ncol as usize + c] = true;
        }
        shapes.push(s);
    };

    let mut row = 4i32;
    let mut col = 0i32;
    loop {
        if row == nrow && col == 0 {
            claim(&mut shapes, &mut occupied, Shape::Corner1);
        }
        if row == nrow - 2 && col == 0 && ncol % 4 != 0 {
            claim(&mut shapes, &mut occupied, Shape::Corner2);
        }
        if row == nrow - 2 && col == 0 && ncol % 8 == 4 {
            claim(&mut shapes, &mut occupied, Shape::Corner3);
        }
        if row == nrow + 4 && col == 2 && ncol % 8 == 0 {
            claim(&mut shapes, &mut occupied, Shape::Corner4);
        }
        // walk up and to the right
        loop {
            if row < nrow && col >= 0 && !occupied[(row * ncol + col) as usize] {
                claim(&mut shapes, &mut occupied, Shape::Utah { row, col });
            }
            row -= 2;
            col += 2;
            if row < 0 || col >= ncol {
                break;
            }
        }
        row += 1;
        col += 3;
        // walk down and to the left
        loop {
            if row >= 0 && col < ncol && !occupied[(row * ncol + col) as usize] {
                claim(&mut shapes, &mut occupied, Shape::Utah { row, col });
            }
            row += 2;
            col -= 2;
            if row >= nrow || col < 0 {
                break;
            }
        }
        row += 3;
        col += 1;
        if row >= nrow && col >= ncol {
            break;
        }
    }
    shapes
}

/// Place a full codeword stream (data followed by ECC) into a finished
/// symbol: finder pattern, clock tracks, data region, and the fixed
/// fill of the unreachable corner cells when the region does not divide
/// evenly. The stream length must equal the symbol's total codewords.
pub fn place(codewords: &[u8], size: SymbolSize) -> ModuleGrid {
    let region = size.data_region_dim() as i32;
    debug_assert_eq!(codewords.len(), size.total_codewords());

    let mut grid = ModuleGrid::new(size.dim, size.dim, 1);
    // finder: solid left column and bottom row, alternating clock on
    // top (dark at even columns) and right (dark at odd rows)
    for i in 0..size.dim {
        grid.set(i, 0, Module::Mark);
        grid.set(size.dim - 1, i, Module::Mark);
        if i % 2 == 0 {
            grid.set(0, i, Module::Mark);
        }
        if i % 2 == 1 {
            grid.set(i, size.dim - 1, Module::Mark);
        }
    }

    let shapes = shape_sequence(region, region);
    debug_assert_eq!(shapes.len(), codewords.len());
    let mut filled = vec![false; (region * region) as usize];
    for (cw, shape) in codewords.iter().zip(&shapes) {
        for (bit, (r, c)) in shape.offsets(region, region).iter().enumerate() {
            filled[r * region as usize + c] = true;
            if cw & (0x80 >> bit) != 0 {
                grid.set(r + 1, c + 1, Module::Mark);
            }
        }
    }

    // regions of size 4k+2 leave a 2x2 hole at the lower right; the
    // standard fixes its diagonal dark and marks the rest unused
    let n = region as usize;
    if !filled[(n - 1) * n + (n - 1)] {
        grid.set(n, n, Module::Mark);
        grid.set(n - 1, n - 1, Module::Mark);
        grid.set(n - 1, n, Module::Unused);
        grid.set(n, n - 1, Module::Unused);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamatrix::tables;

    #[test]
    fn every_region_cell_is_claimed_once() {
        for size in tables::SYMBOL_SIZES {
            let region = size.data_region_dim() as i32;
            let shapes = shape_sequence(region, region);
            assert_eq!(shapes.len(), size.total_codewords(), "dim {}", size.dim);
            let mut counts = vec![0u8; (region * region) as usize];
            for s in &shapes {
                for (r, c) in s.offsets(region, region) {
                    counts[r * region as usize + c] += 1;
                }
            }
            let holes = counts.iter().filter(|&&c| c == 0).count();
            assert!(counts.iter().all(|&c| c <= 1), "dim {}", size.dim);
            // hole only on regions of size 4k+2
            let expected = if (region - 2) % 4 == 0 { 4 } else { 0 };
            assert_eq!(holes, expected, "dim {}", size.dim);
        }
    }

    #[test]
    fn first_shape_starts_at_row_4() {
        // 10x10 symbol, 8x8 region: no corner fires before the first
        // nominal shape at (4, 0)
        let shapes = shape_sequence(8, 8);
        assert_eq!(shapes[0], Shape::Utah { row: 4, col: 0 });
    }

    #[test]
    fn corner_shapes_fire_where_the_walk_lands_on_their_trigger() {
        // the walk reaches (nrow, 0) on regions 12 and 20
        assert!(shape_sequence(12, 12).contains(&Shape::Corner1));
        assert!(shape_sequence(20, 20).contains(&Shape::Corner1));
        // and (nrow - 2, 0) on regions 14 and 22
        assert!(shape_sequence(14, 14).contains(&Shape::Corner2));
        assert!(shape_sequence(22, 22).contains(&Shape::Corner2));
        // the other square regions place nominal shapes only
        for n in [8, 10, 16, 18, 24] {
            assert!(shape_sequence(n, n)
                .iter()
                .all(|s| matches!(s, Shape::Utah { .. })));
        }
    }

    #[test]
    fn finder_pattern() {
        let size = tables::exact(10).unwrap();
        let grid = place(&[0u8; 8], size);
        for i in 0..10 {
            assert!(grid.is_mark(i, 0));
            assert!(grid.is_mark(9, i));
            assert_eq!(grid.is_mark(0, i), i % 2 == 0);
            assert_eq!(grid.is_mark(i, 9), i % 2 == 1);
        }
        assert_eq!(grid.quiet_zone(), 1);
    }

    #[test]
    fn unused_cells_marked_on_12x12() {
        let size = tables::exact(12).unwrap();
        let grid = place(&[0u8; 12], size);
        // data region is 10x10; the hole sits at its lower-right 2x2
        assert_eq!(grid.get(10, 10), Module::Mark);
        assert_eq!(grid.get(9, 9), Module::Mark);
        assert_eq!(grid.get(9, 10), Module::Unused);
        assert_eq!(grid.get(10, 9), Module::Unused);
    }

    #[test]
    fn all_ones_fills_data_region_on_14x14() {
        // 12x12 region divides evenly; every region cell gets a bit
        let size = tables::exact(14).unwrap();
        let grid = place(&[0xFF; 18], size);
        for r in 1..13 {
            for c in 1..13 {
                assert!(grid.is_mark(r, c), "({r},{c})");
            }
        }
    }
}
