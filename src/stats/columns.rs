use crate::data::model::{ColumnKind, Dataset};

/// Columns whose dominant value type is numeric, in column order.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    columns_of_kind(dataset, ColumnKind::Numeric)
}

/// Every column that is not numeric, in column order.
pub fn categorical_columns(dataset: &Dataset) -> Vec<String> {
    columns_of_kind(dataset, ColumnKind::Categorical)
}

fn columns_of_kind(dataset: &Dataset, kind: ColumnKind) -> Vec<String> {
    dataset
        .columns
        .iter()
        .filter(|c| dataset.column_kind(c) == kind)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    #[test]
    fn partition_covers_every_column_once() {
        let ds = Dataset::from_rows(
            &["Survived", "Sex", "Age", "Cabin"],
            vec![
                vec![Cell::Integer(0), Cell::String("male".into()), Cell::Float(22.0), Cell::Null],
                vec![Cell::Integer(1), Cell::String("female".into()), Cell::Null, Cell::Null],
            ],
        );
        assert_eq!(numeric_columns(&ds), vec!["Survived", "Age"]);
        assert_eq!(categorical_columns(&ds), vec!["Sex", "Cabin"]);
    }

    #[test]
    fn empty_dataset_is_all_categorical() {
        let ds = Dataset::from_rows(&["a", "b"], Vec::<Vec<Cell>>::new());
        assert!(numeric_columns(&ds).is_empty());
        assert_eq!(categorical_columns(&ds).len(), 2);
    }
}
