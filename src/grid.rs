//! The crate's single output type: a rectangular grid of modules.

/// One cell of a symbol.
///
/// `Unused` only appears in Data Matrix symbols whose data region does
/// not divide evenly into codeword shapes (a fixed 2x2 block near one
/// corner). Renderers that cannot represent a third state should treat
/// it as `Space`; the standard fill for those cells is already baked in
/// as explicit marks where required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Mark,
    Space,
    Unused,
}

/// A finished symbol: `height` rows of `width` modules, row-major,
/// plus the quiet-zone width (in modules) the symbology requires on
/// every side. The grid itself never includes the quiet zone.
///
/// Linear symbologies produce a grid of height 1; each mark is one
/// narrow-bar width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    height: usize,
    quiet_zone: usize,
    modules: Vec<Module>,
}

impl ModuleGrid {
    /// All-space grid. Placement code turns cells on one by one.
    pub fn new(width: usize, height: usize, quiet_zone: usize) -> Self {
        Self {
            width,
            height,
            quiet_zone,
            modules: vec![Module::Space; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Required quiet-zone width in modules, per side.
    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Module {
        debug_assert!(row < self.height && col < self.width);
        self.modules[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, m: Module) {
        debug_assert!(row < self.height && col < self.width);
        self.modules[row * self.width + col] = m;
    }

    /// True when the cell is a mark. `Unused` counts as not marked.
    #[inline]
    pub fn is_mark(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Module::Mark
    }

    /// Row-major iteration over `(row, col, module)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Module)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .map(move |(i, &m)| (i / self.width, i % self.width, m))
    }

    /// Rows as module slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Module]> {
        self.modules.chunks(self.width)
    }

    /// Render a single row as `#`/`.` (and `?` for unused cells). Test
    /// and debugging aid.
    pub fn row_string(&self, row: usize) -> String {
        self.rows()
            .nth(row)
            .map(|r| {
                r.iter()
                    .map(|m| match m {
                        Module::Mark => '#',
                        Module::Space => '.',
                        Module::Unused => '?',
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
