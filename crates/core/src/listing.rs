//! In-memory list view: search and category filtering over a fetched
//! collection, loading state, and stale-result protection.

use serde::Serialize;

/// A record that can be filtered by a free-text search and one category.
pub trait Filterable {
    /// The categorical attribute matched exactly (status, type, ...).
    type Category: Copy + PartialEq + std::fmt::Debug;

    /// Text fields matched by the search term.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Self::Category;
}

/// Exact-match category predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    #[default]
    All,
    Only(C),
}

impl<C: Copy + PartialEq> CategoryFilter<C> {
    /// `None` means "all".
    pub fn from_option(value: Option<C>) -> Self {
        value.map_or(Self::All, Self::Only)
    }

    pub fn matches(&self, category: C) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => *c == category,
        }
    }
}

/// Search term plus category filter, owned by one list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilter<C> {
    search: String,
    category: CategoryFilter<C>,
}

impl<C> Default for ListFilter<C> {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
        }
    }
}

impl<C: Copy + PartialEq> ListFilter<C> {
    pub fn new(search: impl Into<String>, category: CategoryFilter<C>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> CategoryFilter<C> {
        self.category
    }

    /// Whether any predicate narrows the collection.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category != CategoryFilter::All
    }

    /// Case-insensitive substring match on any search field.
    pub fn matches_search<R: Filterable<Category = C>>(&self, record: &R) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches<R: Filterable<Category = C>>(&self, record: &R) -> bool {
        self.category.matches(record.category()) && self.matches_search(record)
    }

    /// The records passing both predicates, in collection order.
    pub fn apply<'a, R: Filterable<Category = C>>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// Why a list view has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// Nothing has been created yet.
    EmptyCollection,
    /// Records exist but the current search/filter excludes all of them.
    NoMatches,
}

impl EmptyState {
    pub fn guidance(self) -> &'static str {
        match self {
            Self::EmptyCollection => "Nothing here yet. Create your first record to get started.",
            Self::NoMatches => {
                "No records match the current search or filter. Try adjusting or clearing them."
            }
        }
    }
}

/// Identifies one collection load; results from superseded loads are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Holds a fetched collection and the list's own filter state.
#[derive(Debug)]
pub struct ListController<R: Filterable> {
    items: Vec<R>,
    filter: ListFilter<R::Category>,
    loading: bool,
    generation: u64,
    detached: bool,
}

impl<R: Filterable> Default for ListController<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: ListFilter::default(),
            loading: false,
            generation: 0,
            detached: false,
        }
    }
}

impl<R: Filterable> ListController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a load as outstanding; only the latest ticket may complete it.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Replace the collection with a load result.
    ///
    /// Returns `false` (and changes nothing) if the ticket was superseded or
    /// the controller has been detached.
    pub fn finish_load(&mut self, ticket: LoadTicket, items: Vec<R>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.items = items;
        self.loading = false;
        true
    }

    /// End a failed load, keeping the previous collection.
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if self.accepts(ticket) {
            self.loading = false;
        }
    }

    /// Stop accepting results; any in-flight load will be discarded.
    pub fn detach(&mut self) {
        self.detached = true;
        self.loading = false;
    }

    fn accepts(&self, ticket: LoadTicket) -> bool {
        !self.detached && ticket.0 == self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// The full, unfiltered collection.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn filter(&self) -> &ListFilter<R::Category> {
        &self.filter
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter<R::Category>) {
        self.filter.category = category;
    }

    /// The filtered view, recomputed from the full collection.
    pub fn visible(&self) -> Vec<&R> {
        self.filter.apply(&self.items)
    }

    /// `None` when there is something to show (or a load is in progress).
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.loading {
            return None;
        }
        empty_state_for(self.items.len(), self.visible().len())
    }
}

/// Classify an empty view given the collection and filtered sizes.
pub fn empty_state_for(total: usize, visible: usize) -> Option<EmptyState> {
    match (total, visible) {
        (0, _) => Some(EmptyState::EmptyCollection),
        (_, 0) => Some(EmptyState::NoMatches),
        _ => None,
    }
}
