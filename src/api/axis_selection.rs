use smallvec::SmallVec;
use tracing::trace;

/// Y series slots. Each slot may be empty while the user is still picking.
pub type YSeriesSlots = SmallVec<[Option<usize>; 4]>;

/// Column choices for the X axis and the Y series.
///
/// Indexes refer to positions in the current column set. Range checks are the
/// caller's job; projection tolerates stale indexes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisSelection {
    x: Option<usize>,
    y: Option<YSeriesSlots>,
}

impl AxisSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn x(&self) -> Option<usize> {
        self.x
    }

    /// Y slots, or `None` when no series was ever added since the last clear.
    #[must_use]
    pub fn y_slots(&self) -> Option<&[Option<usize>]> {
        self.y.as_deref()
    }

    /// Columns of the non-empty Y slots, in series order.
    #[must_use]
    pub fn selected_y_columns(&self) -> Vec<usize> {
        self.y
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.y.as_ref().map_or(0, SmallVec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Sets or overwrites the X column. Returns `true` when the value changed.
    pub fn select_x(&mut self, column: usize) -> bool {
        let changed = self.x != Some(column);
        self.x = Some(column);
        trace!(column, changed, "select x column");
        changed
    }

    /// Appends a series slot, optionally pre-filled with `column`.
    pub fn add_y_series(&mut self, column: Option<usize>) {
        let slots = self.y.get_or_insert_with(SmallVec::new);
        slots.push(column);
        trace!(?column, series_count = slots.len(), "add y series");
    }

    /// Points series `series` at `column`.
    ///
    /// No-op when no series exist or `series` is out of range. Returns `true`
    /// when the slot changed.
    pub fn update_y_series(&mut self, series: usize, column: usize) -> bool {
        let Some(slot) = self.y.as_mut().and_then(|slots| slots.get_mut(series)) else {
            trace!(series, column, "ignoring y update for missing series");
            return false;
        };
        let changed = *slot != Some(column);
        *slot = Some(column);
        trace!(series, column, changed, "update y series");
        changed
    }

    /// Removes series `series`.
    ///
    /// Removing the last remaining series leaves one empty slot. With no
    /// series, or an out-of-range index among several, nothing happens.
    /// Returns `true` when the slots changed.
    pub fn delete_y_series(&mut self, series: usize) -> bool {
        let Some(slots) = self.y.as_mut() else {
            return false;
        };
        let changed = if slots.len() <= 1 {
            let replaced = slots.as_slice() != [None];
            slots.clear();
            slots.push(None);
            replaced
        } else if series < slots.len() {
            slots.remove(series);
            true
        } else {
            false
        };
        trace!(
            series,
            changed,
            series_count = slots.len(),
            "delete y series"
        );
        changed
    }

    /// Resets both axes. Returns `true` when anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.x = None;
        self.y = None;
        trace!(changed, "clear axis selection");
        changed
    }
}
