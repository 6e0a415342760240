use std::ops;

use crate::dims::Dims;

/// Dense row-major 2D buffer addressed by [`Dims`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        let Dims(x, y) = pos;
        if x < 0 || y < 0 {
            return None;
        }

        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y * self.width + x)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        let x = idx % self.width;
        let y = idx / self.width;

        Some(Dims(x as i32, y as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.width)
    }

    pub fn all(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.buf.iter().all(pred)
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }

    /// Returns `None` unless both sides of `size` are positive.
    pub fn new_dims(item: T, size: Dims) -> Option<Self> {
        if !size.all_positive() {
            return None;
        }

        Some(Self::new(item, size.0 as usize, size.1 as usize))
    }
}

impl<T> Array2D<T> {
    /// Builds the array by calling `f` with every position, row by row.
    pub fn from_fn(size: Dims, mut f: impl FnMut(Dims) -> T) -> Option<Self> {
        if !size.all_positive() {
            return None;
        }

        Some(Self {
            buf: Dims::iter_fill(Dims::ZERO, size).map(&mut f).collect(),
            width: size.0 as usize,
            height: size.1 as usize,
        })
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        let arr = Array2D::new(0u8, 3, 2);
        for pos in arr.iter_pos() {
            let idx = arr.dim_to_idx(pos).unwrap();
            assert_eq!(arr.idx_to_dim(idx), Some(pos));
        }
        assert_eq!(arr.iter_pos().count(), 6);
    }

    #[test]
    fn out_of_bounds() {
        let arr = Array2D::new(0u8, 3, 2);
        assert_eq!(arr.get(Dims(-1, 0)), None);
        assert_eq!(arr.get(Dims(3, 0)), None);
        assert_eq!(arr.get(Dims(0, 2)), None);
        assert_eq!(arr.get(Dims(2, 1)), Some(&0));
    }

    #[test]
    fn rejects_empty_sizes() {
        assert!(Array2D::new_dims(false, Dims(0, 4)).is_none());
        assert!(Array2D::new_dims(false, Dims(4, -1)).is_none());
        assert!(Array2D::from_fn(Dims(0, 0), |_| 0).is_none());
    }

    #[test]
    fn from_fn_matches_positions() {
        let arr = Array2D::from_fn(Dims(4, 3), |pos| pos).unwrap();
        assert!(arr.iter_pos().all(|pos| arr[pos] == pos));
        assert_eq!(arr.rows().count(), 3);
    }
}
