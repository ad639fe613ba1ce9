use super::cell::GridCell;

/// The drawn grid, kept between ticks so that only changed cells are redrawn.
pub struct Frame {
    data: Box<[GridCell]>,
    /// Cells changed since the last `take_dirty`.
    dirty: Box<[bool]>,
    width: u16,
    height: u16,
}

impl Frame {
    /// A frame filled with `cell`, entirely marked for drawing.
    pub fn new(width: u16, height: u16, cell: GridCell) -> Self {
        let len = width as usize * height as usize;
        Frame {
            data: vec![cell; len].into_boxed_slice(),
            dirty: vec![true; len].into_boxed_slice(),
            width,
            height,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_boundary(&self, x: u16, y: u16) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    /// Writes `cell` at `coord`, remembering the change if there is one.
    pub fn set(&mut self, coord: (u16, u16), cell: GridCell) {
        let idx = self.ravel_index(coord.0, coord.1);
        if self.data[idx] != cell {
            self.data[idx] = cell;
            self.dirty[idx] = true;
        }
    }

    /// Marks every cell for drawing, e.g. after the screen was cleared.
    pub fn invalidate(&mut self) {
        self.dirty.fill(true);
    }

    /// Cells to redraw, row by row.
    pub fn take_dirty(&mut self) -> Vec<(u16, u16)> {
        let width = self.width as usize;
        self.dirty
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, dirty)| {
                std::mem::take(dirty).then(|| ((idx % width) as u16, (idx / width) as u16))
            })
            .collect()
    }
}

impl std::ops::Index<(u16, u16)> for Frame {
    type Output = GridCell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}
