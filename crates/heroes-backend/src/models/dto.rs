use heroes_core::{Biography, HeroId, HeroImages, HeroRecord, Powerstats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListHeroesInput {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HeroSummary {
    pub id: HeroId,
    pub name: String,
    pub slug: String,
    pub publisher: Option<String>,
    pub alignment: String,
    pub image_url: String,
}

impl HeroSummary {
    pub fn from_record(record: &HeroRecord) -> Self {
        let Biography {
            publisher,
            alignment,
            ..
        } = &record.biography;
        let HeroImages { sm, xs, .. } = &record.images;

        Self {
            id: record.id,
            name: record.name.clone(),
            slug: record.slug.clone(),
            publisher: publisher.clone(),
            alignment: alignment.clone(),
            image_url: if sm.is_empty() { xs.clone() } else { sm.clone() },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListHeroesOutput {
    pub items: Vec<HeroSummary>,
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HeroDetailInput {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeroSource {
    Cache,
    Remote,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HeroDetailOutput {
    pub source: HeroSource,
    pub hero: HeroRecord,
    pub powerstats_total: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CompareHeroesInput {
    /// Every occurrence of the `ids` query key; only the first one counts.
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompareEntry {
    pub position: usize,
    pub color: String,
    pub hero: HeroSummary,
    pub powerstats: Powerstats,
    pub powerstats_total: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompareHeroesOutput {
    pub selected_ids: Vec<HeroId>,
    pub entries: Vec<CompareEntry>,
    #[serde(default)]
    pub missing_ids: Vec<HeroId>,
}
