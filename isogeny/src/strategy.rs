//! Traversal schedules for the isogeny tree.
//!
//! A strategy is an immutable sequence of small multiplier counts computed
//! offline from the relative cost of one ℓ-multiplication versus one
//! ℓ-isogeny evaluation. Two disciplines for consuming it exist in the wild
//! and both are preserved here: the p751-style tables are serialized optimal
//! trees read sequentially, while the p610-style tables are indexed
//! positionally by the current row and leaf index.

/// Static parameters of one isogeny walk.
#[derive(Clone, Copy, Debug)]
pub struct WalkParams<'a> {
    /// Number of ℓ-isogeny steps (the height of the implicit tree).
    pub height: usize,
    /// Strategy table; interpretation depends on `by_row`.
    pub strategy: &'a [u8],
    /// When true, the multiplier for a descent is `strategy[height − index −
    /// row]`; when false the table is consumed front to back.
    pub by_row: bool,
    /// Number of secret scalar bits fed to the three-point ladder.
    pub scalar_bits: usize,
}

/// Cursor over a strategy table, producing the number of ℓ-multiplications
/// to perform before each descent.
#[derive(Clone, Debug)]
pub struct Schedule<'a> {
    strategy: &'a [u8],
    by_row: bool,
    pos: usize,
}

impl<'a> Schedule<'a> {
    /// Start a schedule over the given walk's strategy table.
    pub fn new(params: &WalkParams<'a>) -> Self {
        Self {
            strategy: params.strategy,
            by_row: params.by_row,
            pos: 0,
        }
    }

    /// Multiplier for the descent from `row` at leaf `index` in a tree of
    /// the given height. Never derived from secret data.
    pub fn next(&mut self, row: usize, index: usize, height: usize) -> usize {
        if self.by_row {
            self.strategy[height - index - row] as usize
        } else {
            let m = self.strategy[self.pos] as usize;
            self.pos += 1;
            m
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_schedule_consumes_in_order() {
        let params = WalkParams {
            height: 4,
            strategy: &[2, 1, 1],
            by_row: false,
            scalar_bits: 8,
        };
        let mut s = Schedule::new(&params);
        assert_eq!(s.next(1, 0, 4), 2);
        assert_eq!(s.next(1, 2, 4), 1);
        assert_eq!(s.next(2, 0, 4), 1);
    }

    #[test]
    fn by_row_schedule_indexes_positionally() {
        let params = WalkParams {
            height: 4,
            strategy: &[0, 9, 8, 7],
            by_row: true,
            scalar_bits: 8,
        };
        let mut s = Schedule::new(&params);
        // height - index - row
        assert_eq!(s.next(1, 0, 4), 7);
        assert_eq!(s.next(2, 1, 4), 9);
        assert_eq!(s.next(3, 0, 4), 9);
    }
}
