use heroes_core::{
    ids_equal, normalize_ids_default, palette_color, CompareStore, HeroCatalogPort, HeroesStore,
    QueryValue,
};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{BackendLogLevel, BackendLoggerPort};
use crate::application::use_cases::list_heroes::ensure_catalog_loaded;
use crate::application::use_cases::log;
use crate::error::BackendResult;
use crate::models::dto::{CompareEntry, CompareHeroesInput, CompareHeroesOutput, HeroSummary};

pub struct CompareHeroesUseCase<'a> {
    catalog: &'a dyn HeroCatalogPort,
    logger: &'a dyn BackendLoggerPort,
}

impl<'a> CompareHeroesUseCase<'a> {
    pub fn new(catalog: &'a dyn HeroCatalogPort, logger: &'a dyn BackendLoggerPort) -> Self {
        Self { catalog, logger }
    }

    pub async fn execute(
        &self,
        heroes: &mut HeroesStore,
        compare: &mut CompareStore,
        input: CompareHeroesInput,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<CompareHeroesOutput> {
        let query = query_value(input.ids);
        let requested = normalize_ids_default(&query);

        if !ids_equal(compare.selected_ids(), &requested) {
            compare.set_from_query(&query);
            log(
                self.logger,
                BackendLogLevel::Info,
                "HC-CP-001",
                "compare_selection_updated",
                serde_json::json!({ "selected_ids": compare.selected_ids() }),
            );
        }

        if !compare.is_empty() && heroes.items().is_empty() {
            ensure_catalog_loaded(heroes, self.catalog, self.logger, cancel, false).await?;
        }

        let selected_ids = compare.selected_ids().to_vec();
        let entries = heroes
            .get_by_ids(&selected_ids)
            .into_iter()
            .enumerate()
            .map(|(position, hero)| CompareEntry {
                position,
                color: palette_color(i64::try_from(position).unwrap_or_default()).to_string(),
                hero: HeroSummary::from_record(hero),
                powerstats: hero.powerstats,
                powerstats_total: hero.powerstats.total(),
            })
            .collect::<Vec<_>>();
        let missing_ids = selected_ids
            .iter()
            .copied()
            .filter(|&id| heroes.by_id(id).is_none())
            .collect::<Vec<_>>();

        log(
            self.logger,
            BackendLogLevel::Info,
            "HC-CP-002",
            "compare_heroes_completed",
            serde_json::json!({
                "selected_ids": selected_ids,
                "resolved": entries.len(),
                "missing_ids": missing_ids,
            }),
        );

        Ok(CompareHeroesOutput {
            selected_ids,
            entries,
            missing_ids,
        })
    }
}

fn query_value(ids: Vec<String>) -> QueryValue {
    match ids.len() {
        0 => QueryValue::Absent,
        1 => ids.into_iter().next().map_or(QueryValue::Absent, QueryValue::Text),
        _ => QueryValue::List(ids),
    }
}

pub async fn compare_heroes(
    heroes: &mut HeroesStore,
    compare: &mut CompareStore,
    input: CompareHeroesInput,
    catalog: &dyn HeroCatalogPort,
    logger: &dyn BackendLoggerPort,
    cancel: Option<&CancellationToken>,
) -> BackendResult<CompareHeroesOutput> {
    CompareHeroesUseCase::new(catalog, logger)
        .execute(heroes, compare, input, cancel)
        .await
}
