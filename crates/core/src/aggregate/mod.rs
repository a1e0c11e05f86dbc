//! Roster aggregator.
//!
//! Folds a row stream into a [`Roster`] with last-write-wins semantics. Rows
//! can be applied one at a time or in fixed-size batches to bound how many
//! decoded rows are buffered; both modes produce the same roster.

mod roster;

pub use roster::Roster;

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::decode::Row;

/// How many rows the aggregator buffers before writing them to the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchSize {
    /// Apply each row as soon as it is decoded.
    #[default]
    Unbounded,
    /// Collect up to this many rows, then apply them all.
    Rows(NonZeroUsize),
}

impl BatchSize {
    /// `Rows(n)` for positive `n`, `Unbounded` for zero.
    pub fn rows(n: usize) -> Self {
        NonZeroUsize::new(n).map_or(Self::Unbounded, Self::Rows)
    }

    pub fn is_batched(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}

/// Fold `rows` into a roster.
///
/// The first error aborts the fold; a partially built roster is never
/// returned.
pub fn aggregate<I, E>(rows: I, batch_size: BatchSize) -> Result<Roster, E>
where
    I: IntoIterator<Item = Result<Row, E>>,
{
    let mut roster = Roster::new();

    match batch_size {
        BatchSize::Unbounded => {
            for row in rows {
                roster.apply(row?);
            }
        }
        BatchSize::Rows(size) => {
            let size = size.get();
            let mut batch: Vec<Row> = Vec::with_capacity(size);

            for row in rows {
                batch.push(row?);
                if batch.len() == size {
                    flush(&mut roster, &mut batch);
                }
            }

            if !batch.is_empty() {
                flush(&mut roster, &mut batch);
            }
        }
    }

    Ok(roster)
}

fn flush(roster: &mut Roster, batch: &mut Vec<Row>) {
    for row in batch.drain(..) {
        roster.apply(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn rows(pairs: &[(&str, &str)]) -> Vec<Result<Row, Infallible>> {
        pairs.iter().map(|(n, p)| Ok(Row::new(*n, *p))).collect()
    }

    #[test]
    fn test_later_rows_overwrite_earlier() {
        let input = [("A", "1"), ("B", "2"), ("A", "3")];
        let expected: Roster = [("A", "3"), ("B", "2")].into_iter().collect();

        for batch_size in [BatchSize::rows(1), BatchSize::rows(2), BatchSize::Unbounded] {
            let roster = aggregate(rows(&input), batch_size).unwrap();
            assert_eq!(roster, expected, "batch size {:?}", batch_size);
        }
    }

    #[test]
    fn test_batch_larger_than_input() {
        let roster = aggregate(rows(&[("a", "1"), ("b", "2")]), BatchSize::rows(100)).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("a"), Some("1"));
    }

    #[test]
    fn test_batch_sizes_agree_on_larger_input() {
        let input: Vec<(String, String)> = (0..257)
            .map(|i| (format!("member-{}", i % 40), i.to_string()))
            .collect();
        let as_rows = || -> Vec<Result<Row, Infallible>> {
            input.iter().map(|(n, p)| Ok(Row::new(n, p))).collect()
        };

        let unbounded = aggregate(as_rows(), BatchSize::Unbounded).unwrap();
        for size in [1, 3, 7, 40, 256, 257, 1000] {
            assert_eq!(aggregate(as_rows(), BatchSize::rows(size)).unwrap(), unbounded);
        }
        assert_eq!(unbounded.len(), 40);
        assert_eq!(unbounded.get("member-16"), Some("256"));
    }

    #[test]
    fn test_empty_input() {
        let roster = aggregate(rows(&[]), BatchSize::rows(4)).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_error_aborts_without_partial_roster() {
        let input: Vec<Result<Row, &str>> = vec![
            Ok(Row::new("a", "1")),
            Err("boom"),
            Ok(Row::new("b", "2")),
        ];

        assert_eq!(aggregate(input.clone(), BatchSize::Unbounded), Err("boom"));
        assert_eq!(aggregate(input, BatchSize::rows(2)), Err("boom"));
    }

    #[test]
    fn test_batch_size_rows_zero_is_unbounded() {
        assert_eq!(BatchSize::rows(0), BatchSize::Unbounded);
        assert!(BatchSize::rows(5).is_batched());
        assert!(!BatchSize::default().is_batched());
    }

    #[test]
    fn test_roster_serializes_as_flat_object() {
        let roster: Roster = [("alice", "1")].into_iter().collect();
        let json = serde_json::to_value(&roster).unwrap();
        assert_eq!(json, serde_json::json!({"alice": "1"}));
    }
}
