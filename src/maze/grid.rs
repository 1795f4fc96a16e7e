use super::{Cell, Dimensions};

/// A dense row-major grid of values, one per cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    data: Box<[T]>,
    dims: Dimensions,
}

impl<T: Copy> Grid<T> {
    pub fn new(dims: Dimensions, value: T) -> Self {
        let data = vec![value; dims.cell_count()].into_boxed_slice();
        Grid { data, dims }
    }
}

impl<T> Grid<T> {
    /// Builds a grid by evaluating `f` at every cell.
    pub fn from_fn(dims: Dimensions, f: impl FnMut(Cell) -> T) -> Self {
        let data = dims.cells().map(f).collect::<Vec<_>>().into_boxed_slice();
        Grid { data, dims }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width()
    }

    pub fn height(&self) -> usize {
        self.dims.height()
    }

    pub fn is_boundary(&self, cell: Cell) -> bool {
        let (x, y) = cell;
        x == 0 || y == 0 || x == self.width() - 1 || y == self.height() - 1
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.dims
            .contains(cell)
            .then(|| &self.data[self.dims.ravel_index(cell)])
    }

    /// Values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> std::ops::Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, index: Cell) -> &Self::Output {
        &self.data[self.dims.ravel_index(index)]
    }
}

impl<T> std::ops::IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, index: Cell) -> &mut Self::Output {
        &mut self.data[self.dims.ravel_index(index)]
    }
}
