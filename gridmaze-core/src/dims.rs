use std::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign},
};

use paste::paste;
use serde::{Deserialize, Serialize};

/// Position or size on the grid, `Dims(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(self, other: Dims) -> i32 {
        (self - other).abs_sum()
    }

    /// Iterates all positions in `from..to`, row by row.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    fn op_unary(self, op: impl Fn(i32) -> i32) -> Self {
        Dims(op(self.0), op(self.1))
    }

    fn op_binary(self, other: Self, op: impl Fn(i32, i32) -> i32) -> Self {
        Dims(op(self.0, other.0), op(self.1, other.1))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

macro_rules! impl_op {
    ($trait:ident + Assign, $op:ident) => {
        impl_op!($trait, $op);

        paste! {
            impl [<$trait Assign>] for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: Dims) {
                    *self = self.$op(other);
                }
            }

            impl [<$trait Assign>]<i32> for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: i32) {
                    *self = self.$op(other);
                }
            }
        }
    };
    ($trait:ident, $op:ident) => {
        impl $trait for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: Dims) -> Dims {
                self.op_binary(other, |a, b| a.$op(b))
            }
        }

        impl $trait<i32> for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: i32) -> Dims {
                self.op_unary(|a| a.$op(other))
            }
        }
    };
}

impl_op!(Add + Assign, add);
impl_op!(Sub + Assign, sub);
impl_op!(Mul + Assign, mul);

#[cfg(test)]
mod tests {
    use super::Dims;

    #[test]
    fn arithmetic() {
        assert_eq!(Dims(1, 2) + Dims(3, 4), Dims(4, 6));
        assert_eq!(Dims(1, 2) - Dims(3, 4), Dims(-2, -2));
        assert_eq!(Dims(2, 3) * 2, Dims(4, 6));

        let mut pos = Dims(5, 5);
        pos += Dims(0, -1);
        pos -= 1;
        assert_eq!(pos, Dims(4, 3));
    }

    #[test]
    fn iter_fill_is_row_major() {
        let all: Vec<_> = Dims::iter_fill(Dims::ZERO, Dims(2, 2)).collect();
        assert_eq!(all, vec![Dims(0, 0), Dims(1, 0), Dims(0, 1), Dims(1, 1)]);
    }

    #[test]
    fn manhattan() {
        assert_eq!(Dims(0, 0).manhattan(Dims(3, 3)), 6);
        assert_eq!(Dims(2, 1).manhattan(Dims(1, 2)), 2);
    }
}
