use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::application::ports::HeroCatalogPort;
use crate::domain::pagination::{
    clamp_page, page_for_index, page_window, total_pages, DEFAULT_PAGE_SIZE,
};
use crate::error::CatalogError;
use crate::models::{HeroId, HeroRecord};

/// Hero collection with query filtering, pagination and an id index.
///
/// Derived views are rebuilt eagerly whenever `items` or `query` change, so
/// every read is a plain lookup.
#[derive(Debug, Clone)]
pub struct HeroesStore {
    items: Vec<HeroRecord>,
    index: HashMap<HeroId, usize>,
    filtered: Vec<usize>,
    loading: bool,
    error: Option<String>,
    query: String,
    page: usize,
    page_size: usize,
}

impl Default for HeroesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroesStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            filtered: Vec::new(),
            loading: false,
            error: None,
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub async fn fetch_all(
        &mut self,
        catalog: &dyn HeroCatalogPort,
        cancel: Option<&CancellationToken>,
    ) {
        let guard = FetchGuard::begin(self);
        let result = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(CatalogError::Cancelled),
                    result = catalog.fetch_all() => result,
                }
            }
            None => catalog.fetch_all().await,
        };
        guard.finish(result);
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<HeroRecord>, CatalogError>) {
        match result {
            Ok(items) => self.replace_items(items),
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    pub fn items(&self) -> &[HeroRecord] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.count(), self.page_size)
    }

    pub fn filtered_items(&self) -> Vec<&HeroRecord> {
        self.filtered
            .iter()
            .filter_map(|&position| self.items.get(position))
            .collect()
    }

    pub fn paged_items(&self) -> Vec<&HeroRecord> {
        let window = page_window(self.page, self.page_size, self.filtered.len());
        self.filtered[window]
            .iter()
            .filter_map(|&position| self.items.get(position))
            .collect()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.rebuild_filter();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn set_page_size(&mut self, page_size: i64) {
        let Ok(page_size) = usize::try_from(page_size) else {
            return;
        };
        if page_size == 0 {
            return;
        }

        let first_index = (self.page - 1).saturating_mul(self.page_size);
        self.page_size = page_size;
        let page = page_for_index(first_index, page_size);
        self.page = clamp_page(i64::try_from(page).unwrap_or(i64::MAX), self.total_pages());
    }

    pub fn by_id(&self, id: HeroId) -> Option<&HeroRecord> {
        self.index
            .get(&id)
            .and_then(|&position| self.items.get(position))
    }

    pub fn get_by_ids(&self, ids: &[HeroId]) -> Vec<&HeroRecord> {
        ids.iter().filter_map(|&id| self.by_id(id)).collect()
    }

    fn replace_items(&mut self, items: Vec<HeroRecord>) {
        self.items = items;
        self.index = HashMap::with_capacity(self.items.len());
        for (position, hero) in self.items.iter().enumerate() {
            self.index.entry(hero.id).or_insert(position);
        }
        self.rebuild_filter();
        self.page = clamp_page(
            i64::try_from(self.page).unwrap_or(i64::MAX),
            self.total_pages(),
        );
    }

    fn rebuild_filter(&mut self) {
        let needle = self.query.to_lowercase();
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, hero)| needle.is_empty() || hero.name.to_lowercase().contains(&needle))
            .map(|(position, _)| position)
            .collect();
    }
}

/// Clears `loading` even when the fetch future is dropped mid-flight.
struct FetchGuard<'a> {
    store: &'a mut HeroesStore,
}

impl<'a> FetchGuard<'a> {
    fn begin(store: &'a mut HeroesStore) -> Self {
        store.begin_fetch();
        Self { store }
    }

    fn finish(self, result: Result<Vec<HeroRecord>, CatalogError>) {
        self.store.finish_fetch(result);
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.store.loading = false;
    }
}
