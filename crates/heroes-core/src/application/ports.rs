use async_trait::async_trait;

use crate::error::CatalogError;
use crate::models::{HeroId, HeroRecord};

#[async_trait]
pub trait HeroCatalogPort: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<HeroRecord>, CatalogError>;
    async fn fetch_by_id(&self, id: HeroId) -> Result<HeroRecord, CatalogError>;
}
