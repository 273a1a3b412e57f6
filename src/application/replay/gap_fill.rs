//! Gap filling over reconstructed snapshots.

use crate::domain::stream::ReconstructedSnapshot;

/// Iterator adapter yielding one snapshot per integer second.
///
/// Between two real snapshots `g > 1` seconds apart it yields `g - 1`
/// copies of the earlier one, each stamped with its own second. Snapshots
/// that do not move time forward are dropped. Nothing is yielded after a
/// closed snapshot.
#[derive(Debug)]
pub struct GapFill<I> {
    inner: I,
    upcoming: Option<ReconstructedSnapshot>,
    previous: Option<ReconstructedSnapshot>,
    done: bool,
}

impl<I> GapFill<I>
where
    I: Iterator<Item = ReconstructedSnapshot>,
{
    /// Wrap a sequence of emitted snapshots.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            upcoming: None,
            previous: None,
            done: false,
        }
    }
}

impl<I> Iterator for GapFill<I>
where
    I: Iterator<Item = ReconstructedSnapshot>,
{
    type Item = ReconstructedSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let upcoming = match self.upcoming.take() {
                Some(snapshot) => snapshot,
                None => self.inner.next()?,
            };

            if let Some(previous) = &mut self.previous {
                if upcoming.elapsed_seconds <= previous.elapsed_seconds {
                    continue;
                }
                if upcoming.elapsed_seconds > previous.elapsed_seconds + 1 {
                    previous.elapsed_seconds += 1;
                    let filler = previous.clone();
                    self.upcoming = Some(upcoming);
                    return Some(filler);
                }
            }

            self.done = upcoming.closed;
            self.previous = Some(upcoming.clone());
            return Some(upcoming);
        }
    }
}

/// Extension for wrapping any snapshot iterator in [`GapFill`].
pub trait GapFillExt: Iterator<Item = ReconstructedSnapshot> + Sized {
    /// Fill gaps between consecutive snapshots.
    fn gap_filled(self) -> GapFill<Self> {
        GapFill::new(self)
    }
}

impl<I> GapFillExt for I where I: Iterator<Item = ReconstructedSnapshot> {}
