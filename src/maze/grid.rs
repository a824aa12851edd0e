/// Dense row-major 2D storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Box<[T]>,
    height: usize,
    width: usize,
}

impl<T: Clone> Grid<T> {
    /// Callers guarantee `height * width` does not overflow.
    pub fn new(height: usize, width: usize, value: T) -> Self {
        Grid {
            data: vec![value; height * width].into_boxed_slice(),
            height,
            width,
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Grid<T> {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, (row, col): (usize, usize)) -> bool {
        row < self.height && col < self.width
    }

    pub fn ravel_index(&self, (row, col): (usize, usize)) -> usize {
        row * self.width + col
    }

    pub fn get(&self, coord: (usize, usize)) -> Option<&T> {
        self.is_in_bounds(coord)
            .then(|| &self.data[self.ravel_index(coord)])
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "coordinate {index:?} is out of bounds"
        );
        &self.data[self.ravel_index(index)]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            self.is_in_bounds(index),
            "coordinate {index:?} is out of bounds"
        );
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}
