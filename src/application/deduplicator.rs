use std::collections::HashSet;

use crate::domain::record::Record;

/// Keeps the last record for every identity key, preserving the input order
/// of the survivors. Returns the survivors and how many records were dropped.
pub fn deduplicate_latest(records: Vec<Record>) -> (Vec<Record>, usize) {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);

    let mut survivors: Vec<Record> = records
        .into_iter()
        .rev()
        .filter(|record| seen.insert(record.identity_key()))
        .collect();
    survivors.reverse();

    let dropped = total - survivors.len();
    (survivors, dropped)
}

/// Weight descending, then count descending, then name by code point.
pub fn sort_for_presentation(records: &mut [Record]) {
    records.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, latitude: f64, weight: u32, count: u32) -> Record {
        Record {
            name: name.to_string(),
            latitude,
            longitude: 135.0,
            weight,
            count,
            updated: String::new(),
            address: None,
        }
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_later_duplicate_wins() {
        let (survivors, dropped) = deduplicate_latest(vec![
            record("A", 35.0, 1, 0),
            record("B", 35.1, 1, 0),
            record("A", 35.00000001, 7, 0),
        ]);

        assert_eq!(dropped, 1);
        assert_eq!(names(&survivors), vec!["B", "A"]);
        assert_eq!(survivors[1].weight, 7);
    }

    #[test]
    fn test_same_name_elsewhere_is_kept() {
        let (survivors, dropped) =
            deduplicate_latest(vec![record("A", 35.0, 1, 0), record("A", 35.5, 2, 0)]);
        assert_eq!(dropped, 0);
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn test_sort_order() {
        let mut records = vec![
            record("B", 35.0, 1, 5),
            record("A", 35.1, 1, 5),
            record("C", 35.2, 2, 0),
        ];
        sort_for_presentation(&mut records);
        assert_eq!(names(&records), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_sort_breaks_weight_ties_by_count() {
        let mut records = vec![
            record("A", 35.0, 3, 1),
            record("B", 35.1, 3, 4),
            record("C", 35.2, 0, 9),
        ];
        sort_for_presentation(&mut records);
        assert_eq!(names(&records), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_names_by_code_point() {
        let mut records = vec![
            record("ポート", 35.0, 0, 0),
            record("b", 35.1, 0, 0),
            record("B", 35.2, 0, 0),
            record("あ", 35.3, 0, 0),
        ];
        sort_for_presentation(&mut records);
        assert_eq!(names(&records), vec!["B", "b", "あ", "ポート"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut records = vec![record("A", 35.0, 1, 1), record("A", 36.0, 1, 1)];
        sort_for_presentation(&mut records);
        assert_eq!(records[0].latitude, 35.0);
        assert_eq!(records[1].latitude, 36.0);
    }
}
