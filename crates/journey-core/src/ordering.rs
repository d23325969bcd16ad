//! Position-aware mutations over the ordered lists inside a trip.
//!
//! The same three operations serve a trip's ideas, its plan days and each
//! day's entries:
//!
//! - [`insert`] splices a new item at an optional position (default: end)
//! - [`reorder`] moves an existing item to a new position in the same list
//! - [`relocate`] moves an item, found by id, from one list into another
//!
//! Positions arrive from clients as signed integers, so out-of-range and
//! negative values are both reported as [`JourneyError::InvalidIndex`].
//! Every operation validates before it mutates: on error the lists are left
//! exactly as they were.
//!
//! An item's current position is never stored on the item. Callers look it
//! up with [`position_of`] when they read the list and pass it in.

use uuid::Uuid;

use crate::{
    error::{JourneyError, Resource, Result},
    models::{Day, Idea, PlanEntry},
};

/// An element of an ordered trip list, addressable by id.
pub trait Positioned {
    /// Resource kind reported when a lookup by id fails.
    const RESOURCE: Resource;

    fn id(&self) -> Uuid;
}

impl Positioned for Idea {
    const RESOURCE: Resource = Resource::Idea;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Positioned for Day {
    const RESOURCE: Resource = Resource::Day;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Positioned for PlanEntry {
    const RESOURCE: Resource = Resource::PlanEntry;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Current zero-based position of the item with the given id.
pub fn position_of<T: Positioned>(list: &[T], id: Uuid) -> Option<usize> {
    list.iter().position(|item| item.id() == id)
}

/// Like [`position_of`], but a missing item is a not-found error.
pub fn require_position<T: Positioned>(list: &[T], id: Uuid) -> Result<usize> {
    position_of(list, id).ok_or_else(|| JourneyError::not_found(T::RESOURCE, id))
}

/// Resolves the position an insert would use: `None` means the end of the
/// list, otherwise `0 <= index <= len` must hold.
pub fn insertion_point(len: usize, index: Option<i64>) -> Result<usize> {
    match index {
        None => Ok(len),
        Some(i) => usize::try_from(i)
            .ok()
            .filter(|&pos| pos <= len)
            .ok_or(JourneyError::InvalidIndex { index: i, len }),
    }
}

/// Resolves the destination of a reorder. `Ok(None)` means there is nothing
/// to do, either because no index was given or because the item is already
/// there. Otherwise `0 <= index <= len - 1` must hold.
pub fn reorder_target(len: usize, current: usize, index: Option<i64>) -> Result<Option<usize>> {
    let Some(i) = index else {
        return Ok(None);
    };

    let target = usize::try_from(i)
        .ok()
        .filter(|&pos| pos < len)
        .ok_or(JourneyError::InvalidIndex { index: i, len })?;

    Ok((target != current).then_some(target))
}

/// Inserts `item` at `index` (default: end), shifting later items right.
/// Returns the position the item ended up at.
pub fn insert<T>(list: &mut Vec<T>, item: T, index: Option<i64>) -> Result<usize> {
    let pos = insertion_point(list.len(), index)?;
    list.insert(pos, item);
    Ok(pos)
}

/// Moves the item at `current` to `index`. All other items keep their
/// relative order. Returns the item's final position.
pub fn reorder<T>(list: &mut Vec<T>, current: usize, index: Option<i64>) -> Result<usize> {
    if current >= list.len() {
        return Err(JourneyError::InvalidIndex {
            index: i64::try_from(current).unwrap_or(i64::MAX),
            len: list.len(),
        });
    }

    match reorder_target(list.len(), current, index)? {
        None => Ok(current),
        Some(target) => {
            let item = list.remove(current);
            list.insert(target, item);
            Ok(target)
        }
    }
}

/// Removes the item with `id` from `source` and inserts it into
/// `destination` at `index` (default: end). The destination position is
/// checked against the destination as it is before the move.
pub fn relocate<T: Positioned>(
    source: &mut Vec<T>,
    destination: &mut Vec<T>,
    id: Uuid,
    index: Option<i64>,
) -> Result<usize> {
    let current = require_position(source, id)?;
    let target = insertion_point(destination.len(), index)?;

    let item = source.remove(current);
    destination.insert(target, item);
    Ok(target)
}

/// Two distinct mutable elements of one slice.
pub(crate) fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= slice.len() || b >= slice.len() {
        return None;
    }

    if a < b {
        let (left, right) = slice.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = slice.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
