use heroes_core::{hero_id_from_int, HeroId};

use crate::error::{BackendError, BackendResult};

pub(crate) fn validate_hero_id(raw: i64) -> BackendResult<HeroId> {
    hero_id_from_int(raw).ok_or_else(|| {
        BackendError::invalid_input(format!("hero id must be a positive integer, got {raw}"))
            .with_code("invalid_hero_id")
    })
}

pub(crate) fn normalize_query(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_hero_id_rejects_non_positive_ids() {
        for raw in [0, -1, i64::MIN] {
            let err = validate_hero_id(raw).expect_err("invalid id must be rejected");
            assert_eq!(err.code(), "invalid_hero_id");
            assert_eq!(
                err.message(),
                format!("hero id must be a positive integer, got {raw}")
            );
        }

        assert_eq!(validate_hero_id(70).expect("valid id"), 70);
    }

    #[test]
    fn normalize_query_trims_but_keeps_explicit_empty_query() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some("  batman ")), Some("batman".to_string()));
        assert_eq!(normalize_query(Some("   ")), Some(String::new()));
    }
}
