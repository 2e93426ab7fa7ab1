use super::model::{Cell, Dataset, is_missing};

// ---------------------------------------------------------------------------
// Source tagging: which file each merged row came from
// ---------------------------------------------------------------------------

/// Names written into `column` when merging: `left` for rows already in the
/// dataset, `right` for the rows being appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTags {
    pub column: String,
    pub left: String,
    pub right: String,
}

/// Concatenate `right` after `left` into a new dataset.
///
/// The column list stays the left one; `right` rows lacking a left column
/// read as missing there. With `tags`, the source column is appended to the
/// column list and every row is stamped with its origin. Left rows that
/// already carry a source (from an earlier merge) keep it.
pub fn merge(left: &Dataset, right: &Dataset, tags: Option<&SourceTags>) -> Dataset {
    let mut columns = left.columns.clone();
    let mut records = Vec::with_capacity(left.len() + right.len());

    match tags {
        Some(tags) => {
            if !columns.contains(&tags.column) {
                columns.push(tags.column.clone());
            }
            for rec in &left.records {
                let mut rec = rec.clone();
                if is_missing(rec.get(&tags.column)) {
                    rec.insert(tags.column.clone(), Cell::String(tags.left.clone()));
                }
                records.push(rec);
            }
            for rec in &right.records {
                let mut rec = rec.clone();
                rec.insert(tags.column.clone(), Cell::String(tags.right.clone()));
                records.push(rec);
            }
        }
        None => {
            records.extend(left.records.iter().cloned());
            records.extend(right.records.iter().cloned());
        }
    }

    log::debug!(
        "Merged {} + {} rows into {} ({} columns)",
        left.len(),
        right.len(),
        records.len(),
        columns.len()
    );

    Dataset::new(columns, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[&str]) -> Dataset {
        Dataset::from_rows(
            &["Name", "Age"],
            names
                .iter()
                .enumerate()
                .map(|(i, n)| vec![Cell::String(n.to_string()), Cell::Integer(20 + i as i64)]),
        )
    }

    fn tags(left: &str, right: &str) -> SourceTags {
        SourceTags {
            column: "Source".into(),
            left: left.into(),
            right: right.into(),
        }
    }

    #[test]
    fn merge_without_tags_concatenates() {
        let merged = merge(&people(&["a", "b"]), &people(&["c"]), None);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.columns, vec!["Name", "Age"]);
        assert_eq!(merged.records[2].get("Name"), Some(&Cell::String("c".into())));
    }

    #[test]
    fn merge_with_tags_stamps_both_sides() {
        let merged = merge(
            &people(&["a"]),
            &people(&["b"]),
            Some(&tags("train.csv", "test.csv")),
        );
        assert_eq!(merged.columns, vec!["Name", "Age", "Source"]);
        assert_eq!(
            merged.records[0].get("Source"),
            Some(&Cell::String("train.csv".into()))
        );
        assert_eq!(
            merged.records[1].get("Source"),
            Some(&Cell::String("test.csv".into()))
        );
    }

    #[test]
    fn repeated_merge_keeps_earlier_tags() {
        let first = merge(&people(&["a"]), &people(&["b"]), Some(&tags("one", "two")));
        let second = merge(&first, &people(&["c"]), Some(&tags("ignored", "three")));
        let sources: Vec<String> = second
            .column("Source")
            .map(|c| c.map(|c| c.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(sources, vec!["one", "two", "three"]);
        assert_eq!(second.columns.iter().filter(|c| *c == "Source").count(), 1);
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let left = people(&["a"]);
        let right = people(&["b"]);
        let _ = merge(&left, &right, Some(&tags("l", "r")));
        assert!(!left.records[0].contains("Source"));
        assert!(!right.records[0].contains("Source"));
    }
}
