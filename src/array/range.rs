//! Half-open index ranges used for slicing.
//!
//! `Range { start, stop, step }` selects `start, start + step, ...` below
//! `stop`. Negative bounds count from the end of the dimension (`-1` is the
//! last index), and an omitted bound means "to the edge".

use serde::{Deserialize, Serialize};

use crate::error::{ArrayError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: usize,
}

impl Default for Range {
    fn default() -> Self {
        Self::all()
    }
}

impl Range {
    /// The whole dimension.
    pub const fn all() -> Self {
        Self {
            start: None,
            stop: None,
            step: 1,
        }
    }

    pub const fn new(start: isize, stop: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    /// From `start` to the end of the dimension.
    pub const fn starting_at(start: isize) -> Self {
        Self {
            start: Some(start),
            stop: None,
            step: 1,
        }
    }

    /// From the beginning of the dimension up to (excluding) `stop`.
    pub const fn up_to(stop: isize) -> Self {
        Self {
            start: None,
            stop: Some(stop),
            step: 1,
        }
    }

    /// A single index; `-1` selects the last one.
    pub const fn index(i: isize) -> Self {
        Self {
            start: Some(i),
            stop: if i == -1 { None } else { Some(i + 1) },
            step: 1,
        }
    }

    pub const fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Resolves negative and omitted bounds against a dimension of `size`.
    pub fn resolve(&self, size: usize) -> Result<ResolvedRange> {
        if self.step == 0 {
            return Err(ArrayError::InvalidShape("range step must be at least 1".into()));
        }
        let fix = |bound: isize| -> isize {
            if bound < 0 {
                bound + size as isize
            } else {
                bound
            }
        };
        let start = self.start.map(fix).unwrap_or(0);
        let stop = self.stop.map(fix).unwrap_or(size as isize);
        if start < 0 || start > stop || stop > size as isize {
            return Err(ArrayError::IndexOutOfRange(format!(
                "range {}..{} does not fit a dimension of size {size}",
                start, stop
            )));
        }
        let span = (stop - start) as usize;
        Ok(ResolvedRange {
            start: start as usize,
            len: span.div_ceil(self.step),
            step: self.step,
        })
    }
}

impl From<std::ops::Range<isize>> for Range {
    fn from(r: std::ops::Range<isize>) -> Self {
        Range::new(r.start, r.end)
    }
}

impl From<std::ops::RangeFrom<isize>> for Range {
    fn from(r: std::ops::RangeFrom<isize>) -> Self {
        Range::starting_at(r.start)
    }
}

impl From<std::ops::RangeTo<isize>> for Range {
    fn from(r: std::ops::RangeTo<isize>) -> Self {
        Range::up_to(r.end)
    }
}

impl From<std::ops::RangeFull> for Range {
    fn from(_: std::ops::RangeFull) -> Self {
        Range::all()
    }
}

/// A range with bounds fixed against a concrete dimension size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: usize,
    pub len: usize,
    pub step: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_stop_counts_from_end() {
        let r = Range::new(4, -1).resolve(20).unwrap();
        assert_eq!(r, ResolvedRange { start: 4, len: 15, step: 1 });
    }

    #[test]
    fn omitted_bounds_reach_the_edges() {
        assert_eq!(Range::all().resolve(7).unwrap().len, 7);
        assert_eq!(Range::up_to(3).resolve(7).unwrap().len, 3);
        let tail = Range::starting_at(-2).resolve(7).unwrap();
        assert_eq!((tail.start, tail.len), (5, 2));
    }

    #[test]
    fn single_index_ranges() {
        assert_eq!(Range::index(-1).resolve(5).unwrap(), ResolvedRange { start: 4, len: 1, step: 1 });
        assert_eq!(Range::index(2).resolve(5).unwrap().start, 2);
    }

    #[test]
    fn steps_round_up() {
        let r = Range::new(1, 8).with_step(3).resolve(10).unwrap();
        assert_eq!(r.len, 3); // 1, 4, 7
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(matches!(
            Range::new(5, 2).resolve(10),
            Err(ArrayError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            Range::new(0, 11).resolve(10),
            Err(ArrayError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            Range::new(-12, 3).resolve(10),
            Err(ArrayError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            Range::all().with_step(0).resolve(10),
            Err(ArrayError::InvalidShape(_))
        ));
    }

    #[test]
    fn std_ranges_convert() {
        assert_eq!(Range::from(0..4), Range::new(0, 4));
        assert_eq!(Range::from(..), Range::all());
        assert_eq!(Range::from(..-1), Range::up_to(-1));
    }
}
