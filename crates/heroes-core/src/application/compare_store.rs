use std::collections::HashSet;

use crate::domain::ids::{hero_id_from_int, normalize_ids, QueryValue, MAX_COMPARE};
use crate::models::HeroId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareStore {
    selected: Vec<HeroId>,
}

impl CompareStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_ids(&self) -> &[HeroId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_COMPARE
    }

    pub fn contains(&self, id: HeroId) -> bool {
        self.selected.contains(&id)
    }

    pub fn set(&mut self, ids: &[i64]) {
        let mut seen = HashSet::new();
        self.selected = ids
            .iter()
            .filter_map(|&raw| hero_id_from_int(raw))
            .filter(|id| seen.insert(*id))
            .take(MAX_COMPARE)
            .collect();
    }

    pub fn set_from_query(&mut self, input: &QueryValue) {
        self.selected = normalize_ids(input, MAX_COMPARE);
    }

    pub fn add(&mut self, id: i64) -> bool {
        let Some(id) = hero_id_from_int(id) else {
            return false;
        };
        if self.contains(id) || self.is_full() {
            return false;
        }
        self.selected.push(id);
        true
    }

    pub fn remove(&mut self, id: HeroId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&selected| selected != id);
        self.selected.len() != before
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Splice-style reorder: take the id at `from` out, insert it at `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.selected.len();
        if from >= len || to >= len {
            return false;
        }
        let id = self.selected.remove(from);
        self.selected.insert(to, id);
        true
    }
}
