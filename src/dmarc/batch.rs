//! Batch partitioning.
//!
//! Splits an ordered stream of items into contiguous batches of at most
//! `limit` items without buffering more than one batch at a time.

use std::num::NonZeroUsize;

/// Iterator adapter yielding contiguous, order-preserving batches.
///
/// Every batch holds exactly `limit` items except possibly the last one.
/// Empty input yields no batches.
#[derive(Debug)]
pub struct Batches<I> {
    inner: I,
    limit: NonZeroUsize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<I::Item> = self.inner.by_ref().take(self.limit.get()).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let limit = self.limit.get();
        let (lower, upper) = self.inner.size_hint();
        (lower.div_ceil(limit), upper.map(|u| u.div_ceil(limit)))
    }
}

/// Partitions `items` into batches of at most `limit`.
pub fn batches<I: IntoIterator>(items: I, limit: NonZeroUsize) -> Batches<I::IntoIter> {
    Batches {
        inner: items.into_iter(),
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        let mut it = batches(Vec::<u32>::new(), limit(500));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_batch_count_and_sizes() {
        for (n, size) in [(1usize, 500usize), (499, 500), (500, 500), (501, 500), (1234, 500), (10, 3), (9, 3)] {
            let sizes: Vec<usize> = batches(0..n, limit(size)).map(|b| b.len()).collect();
            assert_eq!(sizes.len(), n.div_ceil(size), "n={n} size={size}");
            let (last, full) = sizes.split_last().unwrap();
            assert!(full.iter().all(|&s| s == size));
            let expected_last = if n % size == 0 { size } else { n % size };
            assert_eq!(*last, expected_last, "n={n} size={size}");
        }
    }

    #[test]
    fn test_order_preserved_without_loss_or_duplication() {
        let flattened: Vec<u32> = batches(0..1003u32, limit(500)).flatten().collect();
        assert_eq!(flattened, (0..1003).collect::<Vec<_>>());
    }

    #[test]
    fn test_works_on_non_indexable_streams() {
        let stream = "a b c d e".split(' ');
        let got: Vec<Vec<&str>> = batches(stream, limit(2)).collect();
        assert_eq!(got, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
    }

    #[test]
    fn test_size_hint() {
        let it = batches(0..1001, limit(500));
        assert_eq!(it.size_hint(), (3, Some(3)));
    }
}
