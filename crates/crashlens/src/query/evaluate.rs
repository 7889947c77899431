//! The filter evaluator: applies one [`FilterCriteria`] to a dataset
//! snapshot, returning the matching records in dataset order.

use crate::dataset::record::CrashRecord;
use crate::dataset::{Columns, Dataset};
use crate::query::criteria::{FilterCriteria, InjuryType};

/// Evaluate `criteria` against `dataset`.
///
/// Each active dimension is an OR over its values; dimensions combine with
/// AND. A dimension whose backing column(s) are entirely absent from the
/// dataset is inert and matches everything. Evaluation is pure: the dataset
/// is never mutated and output order is the dataset's own.
pub fn evaluate(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<CrashRecord> {
    let columns = dataset.columns();

    // Tokenized once up front. An active search that yields zero words (a
    // whitespace-only string) matches nothing, not everything.
    let search_words: Option<Vec<String>> = match criteria.search_text.as_deref() {
        Some(text) if !text.is_empty() => Some(
            text.to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    };

    dataset
        .records()
        .iter()
        .filter(|record| {
            matches_boroughs(record, &criteria.boroughs, columns)
                && matches_years(record, &criteria.years, columns)
                && matches_vehicle_types(record, &criteria.vehicle_types, columns)
                && matches_contributing_factors(record, &criteria.contributing_factors, columns)
                && matches_injury_types(record, &criteria.injury_types, columns)
                && matches_search(record, search_words.as_deref())
        })
        .cloned()
        .collect()
}

fn matches_boroughs(record: &CrashRecord, boroughs: &[String], columns: &Columns) -> bool {
    if boroughs.is_empty() || !columns.borough {
        return true;
    }
    match record.borough.as_deref() {
        Some(borough) => boroughs.iter().any(|candidate| candidate == borough),
        None => false,
    }
}

fn matches_years(record: &CrashRecord, years: &[i32], columns: &Columns) -> bool {
    if years.is_empty() || !columns.year {
        return true;
    }
    match record.year {
        Some(year) => years.contains(&year),
        None => false,
    }
}

fn matches_vehicle_types(record: &CrashRecord, vehicle_types: &[String], columns: &Columns) -> bool {
    if vehicle_types.is_empty() {
        return true;
    }
    if !columns.vehicle_type_primary && !columns.vehicle_type_secondary {
        return true;
    }
    // Coalesced value: a missing or empty primary falls back to the
    // secondary. The empty string never matches a non-empty target.
    let coalesced = record.coalesced_vehicle_type();
    vehicle_types.iter().any(|candidate| candidate == coalesced)
}

fn matches_contributing_factors(record: &CrashRecord, factors: &[String], columns: &Columns) -> bool {
    if factors.is_empty() {
        return true;
    }
    if !columns.contributing_factor_primary && !columns.contributing_factor_secondary {
        return true;
    }
    // True OR across the two columns, no coalesce.
    let primary = record.contributing_factor_primary.as_deref();
    let secondary = record.contributing_factor_secondary.as_deref();
    factors
        .iter()
        .any(|candidate| Some(candidate.as_str()) == primary || Some(candidate.as_str()) == secondary)
}

fn matches_injury_types(record: &CrashRecord, injury_types: &[InjuryType], columns: &Columns) -> bool {
    if injury_types.is_empty() {
        return true;
    }
    if !columns.persons_injured && !columns.persons_killed {
        return true;
    }
    injury_types.iter().any(|injury| match injury {
        InjuryType::Injured => record.persons_injured.is_some_and(|n| n > 0),
        InjuryType::Killed => record.persons_killed.is_some_and(|n| n > 0),
        // Both counts must be present and exactly zero.
        InjuryType::None => record.persons_injured == Some(0) && record.persons_killed == Some(0),
    })
}

fn matches_search(record: &CrashRecord, words: Option<&[String]>) -> bool {
    let Some(words) = words else {
        return true;
    };
    let fields = record.searchable_fields();
    words.iter().any(|word| {
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(word.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(borough: &str, year: i32) -> CrashRecord {
        CrashRecord {
            borough: Some(borough.to_string()),
            year: Some(year),
            persons_injured: Some(0),
            persons_killed: Some(0),
            ..CrashRecord::default()
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(vec![
            CrashRecord {
                vehicle_type_primary: Some("Sedan".to_string()),
                contributing_factor_primary: Some("Unsafe Speed".to_string()),
                persons_injured: Some(2),
                persons_killed: Some(0),
                on_street_name: Some("ATLANTIC AVENUE".to_string()),
                ..record("Brooklyn", 2021)
            },
            CrashRecord {
                vehicle_type_primary: Some(String::new()),
                vehicle_type_secondary: Some("Taxi".to_string()),
                contributing_factor_secondary: Some("Unsafe Speed".to_string()),
                on_street_name: Some("QUEENS BOULEVARD".to_string()),
                ..record("Queens", 2020)
            },
            CrashRecord {
                vehicle_type_primary: Some("Bus".to_string()),
                persons_injured: Some(0),
                persons_killed: Some(1),
                ..record("Bronx", 2021)
            },
        ])
    }

    fn boroughs_of(results: &[CrashRecord]) -> Vec<&str> {
        results
            .iter()
            .map(|r| r.borough.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn no_criteria_returns_everything_in_order() {
        let dataset = sample_dataset();
        let results = evaluate(&dataset, &FilterCriteria::default());
        assert_eq!(boroughs_of(&results), vec!["Brooklyn", "Queens", "Bronx"]);
    }

    #[test]
    fn borough_match_is_exact_and_case_sensitive() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            boroughs: vec!["Brooklyn".into()],
            ..FilterCriteria::default()
        };
        assert_eq!(boroughs_of(&evaluate(&dataset, &criteria)), vec!["Brooklyn"]);

        let criteria = FilterCriteria {
            boroughs: vec!["BROOKLYN".into()],
            ..FilterCriteria::default()
        };
        assert!(evaluate(&dataset, &criteria).is_empty());
    }

    #[test]
    fn multiple_values_or_within_a_dimension() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            boroughs: vec!["Brooklyn".into(), "Bronx".into()],
            ..FilterCriteria::default()
        };
        assert_eq!(
            boroughs_of(&evaluate(&dataset, &criteria)),
            vec!["Brooklyn", "Bronx"]
        );
    }

    #[test]
    fn dimensions_combine_with_and() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            boroughs: vec!["Brooklyn".into(), "Bronx".into()],
            years: vec![2021],
            injury_types: vec![InjuryType::Killed],
            ..FilterCriteria::default()
        };
        assert_eq!(boroughs_of(&evaluate(&dataset, &criteria)), vec!["Bronx"]);
    }

    #[test]
    fn vehicle_type_coalesces_to_secondary() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            vehicle_types: vec!["Taxi".into()],
            ..FilterCriteria::default()
        };
        assert_eq!(boroughs_of(&evaluate(&dataset, &criteria)), vec!["Queens"]);
    }

    #[test]
    fn contributing_factor_ors_across_both_columns() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            contributing_factors: vec!["Unsafe Speed".into()],
            ..FilterCriteria::default()
        };
        // Brooklyn matches on primary, Queens on secondary.
        assert_eq!(
            boroughs_of(&evaluate(&dataset, &criteria)),
            vec!["Brooklyn", "Queens"]
        );
    }

    #[test]
    fn injury_none_requires_both_counts_present_and_zero() {
        let dataset = Dataset::from_records(vec![
            record("Queens", 2020),
            CrashRecord {
                persons_killed: None,
                ..record("Brooklyn", 2020)
            },
        ]);
        let criteria = FilterCriteria {
            injury_types: vec![InjuryType::None],
            ..FilterCriteria::default()
        };
        assert_eq!(boroughs_of(&evaluate(&dataset, &criteria)), vec!["Queens"]);
    }

    #[test]
    fn injury_types_or_across_requested_values() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            injury_types: vec![InjuryType::Injured, InjuryType::Killed],
            ..FilterCriteria::default()
        };
        assert_eq!(
            boroughs_of(&evaluate(&dataset, &criteria)),
            vec!["Brooklyn", "Bronx"]
        );
    }

    #[test]
    fn search_matches_any_word_in_any_text_column() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            search_text: Some("atlantic boulevard".into()),
            ..FilterCriteria::default()
        };
        // "atlantic" hits Brooklyn's on_street_name, "boulevard" hits Queens'.
        assert_eq!(
            boroughs_of(&evaluate(&dataset, &criteria)),
            vec!["Brooklyn", "Queens"]
        );
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            search_text: Some("TaX".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(boroughs_of(&evaluate(&dataset, &criteria)), vec!["Queens"]);
    }

    #[test]
    fn whitespace_only_search_matches_nothing() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            search_text: Some("   ".into()),
            ..FilterCriteria::default()
        };
        assert!(evaluate(&dataset, &criteria).is_empty());
    }

    #[test]
    fn search_ands_with_structured_dimensions() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            years: vec![2021],
            search_text: Some("avenue".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(boroughs_of(&evaluate(&dataset, &criteria)), vec!["Brooklyn"]);
    }

    #[test]
    fn absent_columns_make_a_dimension_inert() {
        let records = vec![record("Brooklyn", 2021), record("Queens", 2020)];
        let columns = Columns::from_headers(["borough"]);
        let dataset = Dataset::new(records, columns);

        let criteria = FilterCriteria {
            years: vec![1999],
            vehicle_types: vec!["Sedan".into()],
            contributing_factors: vec!["Unsafe Speed".into()],
            injury_types: vec![InjuryType::Killed],
            ..FilterCriteria::default()
        };
        assert_eq!(evaluate(&dataset, &criteria).len(), 2);
    }

    #[test]
    fn present_but_missing_values_simply_fail_to_match() {
        let dataset = Dataset::from_records(vec![CrashRecord::default()]);
        let criteria = FilterCriteria {
            boroughs: vec!["Brooklyn".into()],
            ..FilterCriteria::default()
        };
        assert!(evaluate(&dataset, &criteria).is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria {
            boroughs: vec!["Brooklyn".into(), "Queens".into()],
            search_text: Some("avenue boulevard".into()),
            ..FilterCriteria::default()
        };
        let first = evaluate(&dataset, &criteria);
        let second = evaluate(&dataset, &criteria);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_dataset_yields_empty_results() {
        let dataset = Dataset::from_records(Vec::new());
        assert!(evaluate(&dataset, &FilterCriteria::default()).is_empty());
    }
}
