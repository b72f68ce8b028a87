//! Enumeration of index subsets, used to recombine modular or Kronecker image factors.
//!
//! ```rust
//! use polykernel::combinatorics::CombinationIterator;
//!
//! let mut c = CombinationIterator::new(4, 3);
//! let mut combinations = vec![];
//! while let Some(a) = c.next() {
//!     combinations.push(a.to_vec());
//! }
//!
//! assert_eq!(combinations, vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]);
//! ```

/// Generates the subsets of size `k` of `{0, ..., n-1}` in lexicographic order.
/// Every subset is returned as a sorted slice of indices.
pub struct CombinationIterator {
    n: usize,
    indices: Vec<usize>,
    init: bool,
}

impl CombinationIterator {
    pub fn new(n: usize, k: usize) -> CombinationIterator {
        CombinationIterator {
            indices: (0..k).collect(),
            n,
            init: false,
        }
    }

    /// Advance to the next subset.
    pub fn next(&mut self) -> Option<&[usize]> {
        if self.indices.is_empty() || self.indices.len() > self.n {
            return None;
        }

        if !self.init {
            self.init = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        let pos = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i)?;

        let start = self.indices[pos] + 1;
        for (offset, v) in self.indices[pos..].iter_mut().enumerate() {
            *v = start + offset;
        }

        Some(&self.indices)
    }

    /// The indices that are not in the current subset.
    pub fn complement(&self) -> Vec<usize> {
        (0..self.n)
            .filter(|i| self.indices.binary_search(i).is_err())
            .collect()
    }
}

/// Remove the elements at the sorted `indices` from `v` and return them in order.
pub fn take_indices<T>(v: &mut Vec<T>, indices: &[usize]) -> Vec<T> {
    let mut taken: Vec<T> = indices.iter().rev().map(|i| v.remove(*i)).collect();
    taken.reverse();
    taken
}

#[cfg(test)]
mod test {
    use super::{take_indices, CombinationIterator};

    #[test]
    fn combinations() {
        let mut c = CombinationIterator::new(4, 2);
        let mut combinations = vec![];
        while let Some(a) = c.next() {
            combinations.push(a.to_vec());
        }

        assert_eq!(
            combinations,
            vec![[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]]
        );
    }

    #[test]
    fn empty_and_oversized() {
        assert!(CombinationIterator::new(3, 0).next().is_none());
        assert!(CombinationIterator::new(2, 3).next().is_none());
    }

    #[test]
    fn complement_and_take() {
        let mut c = CombinationIterator::new(5, 2);
        c.next();
        c.next();
        assert_eq!(c.complement(), vec![1, 3, 4]);

        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        assert_eq!(take_indices(&mut v, &[0, 2]), vec!['a', 'c']);
        assert_eq!(v, vec!['b', 'd', 'e']);
    }
}
