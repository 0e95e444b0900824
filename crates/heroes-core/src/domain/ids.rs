use std::collections::HashSet;

use crate::models::HeroId;

pub const MAX_COMPARE: usize = 4;

/// Raw value of a query parameter as handed over by a router: missing, a
/// single occurrence, or every occurrence of a repeated key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryValue {
    #[default]
    Absent,
    Text(String),
    List(Vec<String>),
}

impl QueryValue {
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Text(text) => Some(text.as_str()),
            Self::List(items) => items.first().map(String::as_str),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for QueryValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

pub fn normalize_ids(input: &QueryValue, max: usize) -> Vec<HeroId> {
    let Some(raw) = input.first_text() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    raw.split(',')
        .filter_map(parse_id_piece)
        .filter(|id| seen.insert(*id))
        .take(max)
        .collect()
}

pub fn normalize_ids_default(input: &QueryValue) -> Vec<HeroId> {
    normalize_ids(input, MAX_COMPARE)
}

pub fn ids_equal(a: &[HeroId], b: &[HeroId]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(left, right)| left == right)
}

/// Truncates toward zero and keeps the value only when it is a usable id.
pub fn hero_id_from_number(value: f64) -> Option<HeroId> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // `HeroId::MAX as f64` rounds up to 2^64, which no id can reach.
    if truncated <= 0.0 || truncated >= HeroId::MAX as f64 {
        return None;
    }
    Some(truncated as HeroId)
}

pub fn hero_id_from_int(value: i64) -> Option<HeroId> {
    if value <= 0 {
        return None;
    }
    HeroId::try_from(value).ok()
}

fn parse_id_piece(piece: &str) -> Option<HeroId> {
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(hero_id_from_number)
}
