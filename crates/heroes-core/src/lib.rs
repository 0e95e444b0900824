#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod application;
mod domain;
mod error;
mod models;

pub use application::compare_store::CompareStore;
pub use application::heroes_store::HeroesStore;
pub use application::ports::HeroCatalogPort;
pub use domain::ids::{
    hero_id_from_int, hero_id_from_number, ids_equal, normalize_ids, normalize_ids_default,
    QueryValue, MAX_COMPARE,
};
pub use domain::pagination::DEFAULT_PAGE_SIZE;
pub use domain::palette::{palette_color, PALETTE};
pub use error::CatalogError;
pub use models::{
    Appearance, Biography, Connections, HeroId, HeroImages, HeroRecord, Powerstats, Work,
};
