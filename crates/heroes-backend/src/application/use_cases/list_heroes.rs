use heroes_core::{CatalogError, HeroCatalogPort, HeroesStore};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{BackendLogLevel, BackendLoggerPort};
use crate::application::use_cases::log;
use crate::domain::validation::normalize_query;
use crate::error::{BackendError, BackendResult};
use crate::models::dto::{HeroSummary, ListHeroesInput, ListHeroesOutput};

pub struct ListHeroesUseCase<'a> {
    catalog: &'a dyn HeroCatalogPort,
    logger: &'a dyn BackendLoggerPort,
}

impl<'a> ListHeroesUseCase<'a> {
    pub fn new(catalog: &'a dyn HeroCatalogPort, logger: &'a dyn BackendLoggerPort) -> Self {
        Self { catalog, logger }
    }

    pub async fn execute(
        &self,
        store: &mut HeroesStore,
        input: ListHeroesInput,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<ListHeroesOutput> {
        if input.refresh || store.items().is_empty() {
            ensure_catalog_loaded(store, self.catalog, self.logger, cancel, input.refresh)
                .await?;
        }

        if let Some(page_size) = input.page_size {
            store.set_page_size(page_size);
        }
        if let Some(query) = normalize_query(input.query.as_deref()) {
            store.set_query(query);
        }
        if let Some(page) = input.page {
            store.set_page(page);
        }

        let output = ListHeroesOutput {
            items: store
                .paged_items()
                .into_iter()
                .map(HeroSummary::from_record)
                .collect(),
            query: store.query().to_string(),
            page: store.page(),
            page_size: store.page_size(),
            total_pages: store.total_pages(),
            count: store.count(),
            stale_error: store.error().map(str::to_string),
        };

        log(
            self.logger,
            BackendLogLevel::Info,
            "HC-LS-002",
            "list_heroes_completed",
            serde_json::json!({
                "query": output.query,
                "page": output.page,
                "total_pages": output.total_pages,
                "count": output.count,
            }),
        );

        Ok(output)
    }
}

/// Fetches the collection into `store`. Fails only when the fetch failed and
/// no earlier snapshot is available to fall back on.
pub(crate) async fn ensure_catalog_loaded(
    store: &mut HeroesStore,
    catalog: &dyn HeroCatalogPort,
    logger: &dyn BackendLoggerPort,
    cancel: Option<&CancellationToken>,
    refresh: bool,
) -> BackendResult<()> {
    log(
        logger,
        BackendLogLevel::Info,
        "HC-LS-001",
        "hero_catalog_fetch_requested",
        serde_json::json!({
            "refresh": refresh,
            "cached_items": store.items().len(),
        }),
    );

    store.fetch_all(catalog, cancel).await;

    let Some(message) = store.error().map(str::to_string) else {
        return Ok(());
    };

    if !store.items().is_empty() {
        log(
            logger,
            BackendLogLevel::Warn,
            "HC-LS-003",
            "hero_catalog_fetch_failed_serving_stale",
            serde_json::json!({
                "error": message,
                "cached_items": store.items().len(),
            }),
        );
        return Ok(());
    }

    log(
        logger,
        BackendLogLevel::Error,
        "HC-LS-004",
        "hero_catalog_unavailable",
        serde_json::json!({ "error": message }),
    );

    if cancel.is_some_and(CancellationToken::is_cancelled) {
        return Err(CatalogError::Cancelled.into());
    }
    Err(BackendError::new("catalog_unavailable", message))
}

pub async fn list_heroes(
    store: &mut HeroesStore,
    input: ListHeroesInput,
    catalog: &dyn HeroCatalogPort,
    logger: &dyn BackendLoggerPort,
    cancel: Option<&CancellationToken>,
) -> BackendResult<ListHeroesOutput> {
    ListHeroesUseCase::new(catalog, logger)
        .execute(store, input, cancel)
        .await
}
