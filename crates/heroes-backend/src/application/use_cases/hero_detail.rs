use heroes_core::{CatalogError, HeroCatalogPort, HeroRecord, HeroesStore};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{BackendLogLevel, BackendLoggerPort};
use crate::application::use_cases::log;
use crate::domain::validation::validate_hero_id;
use crate::error::BackendResult;
use crate::models::dto::{HeroDetailInput, HeroDetailOutput, HeroSource};

pub struct HeroDetailUseCase<'a> {
    catalog: &'a dyn HeroCatalogPort,
    logger: &'a dyn BackendLoggerPort,
}

impl<'a> HeroDetailUseCase<'a> {
    pub fn new(catalog: &'a dyn HeroCatalogPort, logger: &'a dyn BackendLoggerPort) -> Self {
        Self { catalog, logger }
    }

    /// Serves the hero from the loaded collection when possible and only
    /// asks the catalog for that single record on a cache miss.
    pub async fn execute(
        &self,
        store: &HeroesStore,
        input: HeroDetailInput,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<HeroDetailOutput> {
        let id = validate_hero_id(input.id)?;

        if let Some(hero) = store.by_id(id) {
            return Ok(self.completed(HeroSource::Cache, hero.clone()));
        }

        log(
            self.logger,
            BackendLogLevel::Info,
            "HC-HD-001",
            "hero_detail_cache_miss",
            serde_json::json!({ "id": id }),
        );

        let result = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(CatalogError::Cancelled),
                    result = self.catalog.fetch_by_id(id) => result,
                }
            }
            None => self.catalog.fetch_by_id(id).await,
        };

        match result {
            Ok(hero) => Ok(self.completed(HeroSource::Remote, hero)),
            Err(err) => {
                log(
                    self.logger,
                    BackendLogLevel::Warn,
                    "HC-HD-003",
                    "hero_detail_failed",
                    serde_json::json!({ "id": id, "error": err.to_string() }),
                );
                Err(err.into())
            }
        }
    }

    fn completed(&self, source: HeroSource, hero: HeroRecord) -> HeroDetailOutput {
        log(
            self.logger,
            BackendLogLevel::Info,
            "HC-HD-002",
            "hero_detail_completed",
            serde_json::json!({ "id": hero.id, "source": source }),
        );
        HeroDetailOutput {
            source,
            powerstats_total: hero.powerstats.total(),
            hero,
        }
    }
}

pub async fn hero_detail(
    store: &HeroesStore,
    input: HeroDetailInput,
    catalog: &dyn HeroCatalogPort,
    logger: &dyn BackendLoggerPort,
    cancel: Option<&CancellationToken>,
) -> BackendResult<HeroDetailOutput> {
    HeroDetailUseCase::new(catalog, logger)
        .execute(store, input, cancel)
        .await
}
