//! Persistent view state of one data table.

use std::collections::{BTreeMap, BTreeSet};

use ustr::Ustr;

use crate::column::ColumnDescriptor;
use crate::criteria::FilterCriteria;
use crate::error::ConfigError;
use crate::pagination::DEFAULT_SIBLING_COUNT;

/// Page sizes offered by the pager.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 20, 25, 30, 40, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: Ustr,
    pub direction: SortDirection,
}

/// Paging, sorting, filtering, column visibility and selection of a table.
///
/// Any change to what rows are shown (filter, column filters, sort, page
/// size) moves back to the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    page_index: usize,
    page_size: usize,
    sibling_count: usize,
    sort: Option<SortState>,
    filter: FilterCriteria,
    column_filters: BTreeMap<Ustr, String>,
    hidden_columns: BTreeSet<Ustr>,
    selected_rows: BTreeSet<usize>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sibling_count: DEFAULT_SIBLING_COUNT,
            sort: None,
            filter: FilterCriteria::new(),
            column_filters: BTreeMap::new(),
            hidden_columns: BTreeSet::new(),
            selected_rows: BTreeSet::new(),
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Result<Self, ConfigError> {
        let mut state = Self::new();
        state.set_page_size(page_size)?;
        Ok(state)
    }

    #[must_use]
    pub fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    // =====================
    // Paging
    // =====================

    /// Zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// Moves to `page_index`. The view clamps it to the last page.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page_index + 1 < page_count {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Rejects sizes the pager does not offer.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ConfigError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ConfigError::PageSize(page_size, PAGE_SIZE_OPTIONS));
        }
        if self.page_size != page_size {
            self.page_size = page_size;
            self.page_index = 0;
        }
        Ok(())
    }

    /// Pulls the page index back inside `0..page_count` after rows went away.
    pub fn clamp_page(&mut self, page_count: usize) {
        let last = page_count.saturating_sub(1);
        if self.page_index > last {
            log::debug!("clamping table page {} to {}", self.page_index, last);
            self.page_index = last;
        }
    }

    // =====================
    // Sorting
    // =====================

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn sort_direction(&self, key: Ustr) -> Option<SortDirection> {
        self.sort
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    /// Cycles the sort of `key`: ascending, descending, unsorted. Sorting by
    /// another key starts over at ascending.
    pub fn toggle_sort(&mut self, key: Ustr) {
        self.sort = match self.sort_direction(key) {
            None => Some(SortState {
                key,
                direction: SortDirection::Ascending,
            }),
            Some(SortDirection::Ascending) => Some(SortState {
                key,
                direction: SortDirection::Descending,
            }),
            Some(SortDirection::Descending) => None,
        };
        self.page_index = 0;
    }

    // =====================
    // Filtering
    // =====================

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Replaces the search criteria and returns to the first page.
    pub fn set_filter(&mut self, filter: FilterCriteria) {
        log::debug!("table filter set with {} criteria", filter.len());
        self.filter = filter;
        self.page_index = 0;
    }

    pub fn column_filter(&self, key: Ustr) -> Option<&str> {
        self.column_filters.get(&key).map(String::as_str)
    }

    /// Sets a header filter as typed; an empty value removes it.
    ///
    /// Surrounding whitespace is kept so the text field does not fight the
    /// user, and is ignored when rows are matched. The page only resets when
    /// the trimmed filter changes.
    pub fn set_column_filter(&mut self, key: Ustr, value: impl Into<String>) {
        let value = value.into();
        let before = self.column_filter(key).map(str::trim).unwrap_or_default().to_owned();
        if value.is_empty() {
            self.column_filters.remove(&key);
        } else {
            self.column_filters.insert(key, value);
        }
        if self.column_filter(key).map(str::trim).unwrap_or_default() != before {
            self.page_index = 0;
        }
    }

    pub fn column_filters(&self) -> impl Iterator<Item = (Ustr, &str)> {
        self.column_filters
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
    }

    // =====================
    // Column visibility
    // =====================

    pub fn is_column_visible(&self, id: Ustr) -> bool {
        !self.hidden_columns.contains(&id)
    }

    /// Shows or hides `column`. Returns `false` for columns that cannot be hidden.
    pub fn set_column_visible<R>(&mut self, column: &ColumnDescriptor<R>, visible: bool) -> bool {
        let id = column.identifier();
        if visible {
            self.hidden_columns.remove(&id);
            return true;
        }
        if !column.can_hide() {
            return false;
        }
        self.hidden_columns.insert(id);
        true
    }

    // =====================
    // Selection
    // =====================

    /// Selection is keyed by the row's index in the page's data.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected_rows.contains(&row)
    }

    pub fn toggle_selected(&mut self, row: usize) {
        if !self.selected_rows.remove(&row) {
            self.selected_rows.insert(row);
        }
    }

    pub fn select_all(&mut self, rows: impl IntoIterator<Item = usize>) {
        self.selected_rows.extend(rows);
    }

    pub fn clear_selection(&mut self) {
        self.selected_rows.clear();
    }

    pub fn selected_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected_rows.iter().copied()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_rows.len()
    }
}
