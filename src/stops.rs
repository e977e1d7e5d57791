//! Operations on the ordered stop list.
//!
//! The list always holds at least [`MIN_STOPS`] stops. Insertions land at
//! their sorted position; re-sorting is stable and reports the permutation
//! so callers can follow a stop's identity across the reorder.

use crate::types::GradientStop;

/// A gradient never has fewer stops than this.
pub const MIN_STOPS: usize = 2;

/// Index a new stop at `offset` should be inserted at: the first stop whose
/// offset exceeds it, or the end.
pub fn insertion_index<C>(stops: &[GradientStop<C>], offset: f64) -> usize {
    stops
        .iter()
        .position(|stop| stop.offset > offset)
        .unwrap_or(stops.len())
}

/// [`insertion_index`] in the list as it will be once sorted.
pub fn sorted_insertion_index<C>(stops: &[GradientStop<C>], offset: f64) -> usize {
    stops.iter().filter(|stop| stop.offset <= offset).count()
}

/// Insert `stop` at its sorted position and return that position.
pub fn insert_sorted<C>(stops: &mut Vec<GradientStop<C>>, stop: GradientStop<C>) -> usize {
    let index = insertion_index(stops, stop.offset);
    stops.insert(index, stop);
    index
}

/// Stable ascending order of the stops by offset: `sorted[i] = stops[order[i]]`.
pub fn sort_order<C>(stops: &[GradientStop<C>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..stops.len()).collect();
    // sort_by is stable, equal offsets keep their relative order
    order.sort_by(|&l, &r| stops[l].offset.total_cmp(&stops[r].offset));
    order
}

/// Whether `order` leaves everything in place.
pub fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &j)| i == j)
}

/// Rearrange `items` so that `items[i]` becomes the old `items[order[i]]`.
pub fn apply_order<T>(items: &mut Vec<T>, order: &[usize]) {
    debug_assert_eq!(items.len(), order.len());
    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.iter().filter_map(|&i| slots.get_mut(i).and_then(Option::take)));
}

/// New position of the item that used to be at `old` after `order` is applied.
pub fn remap_index(order: &[usize], old: usize) -> Option<usize> {
    order.iter().position(|&i| i == old)
}

/// Stable-sort the stops by offset and return the applied permutation.
pub fn sort_stops<C>(stops: &mut Vec<GradientStop<C>>) -> Vec<usize> {
    let order = sort_order(stops);
    if !is_identity(&order) {
        apply_order(stops, &order);
    }
    order
}

/// Whether deleting a stop is allowed for a list of `len` stops.
#[inline]
pub fn can_delete(len: usize) -> bool {
    len > MIN_STOPS
}

/// Where focus goes after the stop at `removed` disappears.
///
/// A focus on the removed stop is cleared; a focus past it shifts down by
/// one so it keeps pointing at the same stop.
pub fn focus_after_delete(focused: Option<usize>, removed: usize) -> Option<usize> {
    match focused {
        Some(f) if f == removed => None,
        Some(f) if f > removed => Some(f - 1),
        other => other,
    }
}

/// Remove the stop at `index` unless that would drop below [`MIN_STOPS`] or
/// the index is out of range.
pub fn delete_stop<C>(stops: &mut Vec<GradientStop<C>>, index: usize) -> Option<GradientStop<C>> {
    if !can_delete(stops.len()) || index >= stops.len() {
        return None;
    }
    Some(stops.remove(index))
}

/// Whether the stops are in ascending offset order.
pub fn is_sorted<C>(stops: &[GradientStop<C>]) -> bool {
    stops.windows(2).all(|pair| pair[0].offset <= pair[1].offset)
}
