use super::model::{Record, RecordStore};

// ---------------------------------------------------------------------------
// Filter criteria: search text + selected manufacturer
// ---------------------------------------------------------------------------

/// User-chosen filters. `selected_make` of `None` (or an empty string) means
/// "All Makes".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub search_text: String,
    pub selected_make: Option<String>,
}

impl FilterCriteria {
    fn active_make(&self) -> Option<&str> {
        self.selected_make.as_deref().filter(|m| !m.is_empty())
    }
}

/// Whether a record passes both predicates.
///
/// * make or model, lower-cased, contains the lower-cased search text
///   (absent fields count as empty strings, so empty text matches everything)
/// * the selected make, if any, equals the record's make exactly
pub fn matches(record: &Record, criteria: &FilterCriteria, needle: &str) -> bool {
    let text_hit = [record.make.as_deref(), record.model.as_deref()]
        .into_iter()
        .any(|field| field.unwrap_or("").to_lowercase().contains(needle));
    if !text_hit {
        return false;
    }
    match criteria.active_make() {
        Some(make) => record.make.as_deref() == Some(make),
        None => true,
    }
}

/// Return indices of records that pass the criteria, in store order.
pub fn filtered_indices(store: &RecordStore, criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.search_text.to_lowercase();
    store
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, criteria, &needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            record("Tesla", "Model X", "300"),
            record("Nissan", "Leaf", "150"),
            record("Tesla", "Model Y", "abc"),
            record("KIA", "Niro", "239"),
        ])
    }

    fn criteria(search: &str, make: Option<&str>) -> FilterCriteria {
        FilterCriteria {
            search_text: search.to_string(),
            selected_make: make.map(str::to_string),
        }
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let s = store();
        assert_eq!(filtered_indices(&s, &FilterCriteria::default()), vec![0, 1, 2, 3]);
        assert_eq!(filtered_indices(&s, &criteria("", Some(""))), vec![0, 1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_on_make_and_model() {
        let s = store();
        assert_eq!(filtered_indices(&s, &criteria("tes", None)), vec![0, 2]);
        assert_eq!(filtered_indices(&s, &criteria("LEAF", None)), vec![1]);
        assert_eq!(filtered_indices(&s, &criteria("ni", None)), vec![1, 3]);
        assert!(filtered_indices(&s, &criteria("zzz", None)).is_empty());
    }

    #[test]
    fn selected_make_is_exact_and_case_sensitive() {
        let s = store();
        assert_eq!(filtered_indices(&s, &criteria("", Some("Tesla"))), vec![0, 2]);
        assert!(filtered_indices(&s, &criteria("", Some("tesla"))).is_empty());
        assert!(filtered_indices(&s, &criteria("", Some("Kia"))).is_empty());
    }

    #[test]
    fn both_predicates_must_hold() {
        let s = store();
        assert_eq!(filtered_indices(&s, &criteria("y", Some("Tesla"))), vec![2]);
        assert!(filtered_indices(&s, &criteria("leaf", Some("Tesla"))).is_empty());
    }

    #[test]
    fn record_without_make_or_model() {
        let s = RecordStore::from_records(vec![record("", "", "10")]);
        assert_eq!(filtered_indices(&s, &FilterCriteria::default()), vec![0]);
        assert!(filtered_indices(&s, &criteria("a", None)).is_empty());
        assert!(filtered_indices(&s, &criteria("", Some("Tesla"))).is_empty());
    }
}
