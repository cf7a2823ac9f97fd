//! Composed dashboard pipeline
//!
//! `DashboardView` owns one loaded snapshot of records and the current
//! filter, sort and page. The visible list is recomputed as
//! filter → sort whenever a predicate or the sort changes, and every such
//! change puts the view back on page 1.

use crate::filter::{FilterSet, Range, filter};
use crate::models::{MunicipalityRecord, NumericField};
use crate::paginate::{Page, Paginator};
use crate::sort::{SortSpec, sort_in_place};

/// Searchable, sortable, paginated view over a record snapshot
#[derive(Debug, Clone)]
pub struct DashboardView {
    records: Vec<MunicipalityRecord>,
    filters: FilterSet,
    sort: SortSpec,
    paginator: Paginator,
    current_page: usize,
    visible: Vec<MunicipalityRecord>,
}

impl DashboardView {
    /// Create a view with the dashboard's default filters and sort
    #[must_use]
    pub fn new(records: Vec<MunicipalityRecord>, paginator: Paginator) -> Self {
        let mut view = Self {
            records,
            filters: FilterSet::dashboard_defaults(),
            sort: SortSpec::default(),
            paginator,
            current_page: 1,
            visible: Vec::new(),
        };
        view.refresh();
        view
    }

    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.set_filters(filters);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.set_sort(sort);
        self
    }

    /// Every loaded record, in store order
    #[must_use]
    pub fn records(&self) -> &[MunicipalityRecord] {
        &self.records
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[must_use]
    pub const fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.set_query(query);
        self.refresh();
    }

    pub fn set_range(&mut self, field: NumericField, range: Range) {
        self.filters.set_range(field, range);
        self.refresh();
    }

    pub fn clear_range(&mut self, field: NumericField) {
        self.filters.clear_range(field);
        self.refresh();
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.refresh();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.refresh();
    }

    /// Move to a 1-indexed page; pages past the end show no records
    pub fn go_to_page(&mut self, page_number: usize) {
        self.current_page = page_number.max(1);
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.visible.len())
    }

    /// Records matching the filters, in sort order
    #[must_use]
    pub fn filtered(&self) -> &[MunicipalityRecord] {
        &self.visible
    }

    /// The first `n` filtered records in sort order
    #[must_use]
    pub fn leading(&self, n: usize) -> &[MunicipalityRecord] {
        &self.visible[..n.min(self.visible.len())]
    }

    /// The current page of the filtered, sorted records
    #[must_use]
    pub fn page(&self) -> Page<'_, MunicipalityRecord> {
        self.paginator.page(&self.visible, self.current_page)
    }

    fn refresh(&mut self) {
        let mut visible = filter(&self.records, &self.filters);
        sort_in_place(&mut visible, self.sort);
        log::debug!(
            "View refreshed: {} of {} records match, sorted by {}",
            visible.len(),
            self.records.len(),
            self.sort
        );
        self.visible = visible;
        self.current_page = 1;
    }
}
