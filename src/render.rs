//! Optional `embedded-graphics` output.
//!
//! Enabled by the `embedded-graphics` feature. Marks draw as `On`
//! pixels, everything else (unused cells and the quiet zone included)
//! as `Off`, so the symbol arrives on the display with its mandatory
//! light border regardless of what was there before.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::grid::ModuleGrid;

/// Side length in pixels of the area `grid` covers at `scale` pixels
/// per module, quiet zone included.
pub fn pixel_size(grid: &ModuleGrid, scale: u32) -> Size {
    let q = 2 * grid.quiet_zone() as u32;
    Size::new(
        (grid.width() as u32 + q) * scale,
        (grid.height() as u32 + q) * scale,
    )
}

/// Draw `grid` with its top-left quiet-zone corner at `origin`.
pub fn draw<D>(
    grid: &ModuleGrid,
    target: &mut D,
    origin: Point,
    scale: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(origin, pixel_size(grid, scale))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(target)?;
    let q = grid.quiet_zone() as i32;
    for (row, col, _) in grid.iter() {
        if !grid.is_mark(row, col) {
            continue;
        }
        let top_left = origin
            + Point::new(
                (col as i32 + q) * scale as i32,
                (row as i32 + q) * scale as i32,
            );
        Rectangle::new(top_left, Size::new(scale, scale))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)?;
    }
    Ok(())
}
