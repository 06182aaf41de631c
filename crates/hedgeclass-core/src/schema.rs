/// Arrow schema definitions for label vectors and resolved labels.
pub mod labels {
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    use crate::vector::Field as VectorField;

    /// Strict-mode output column: one primary label id per row.
    pub const PRIMARY_LABEL_COLUMN: &str = "primary_label";

    /// Probabilistic-mode output column: ranked label names per row.
    pub const PREDICTED_LABELS_COLUMN: &str = "predicted_labels";

    /// Schema holding the 16 label vector fields in contract order.
    pub fn label_vector_schema() -> Schema {
        Schema::new(
            VectorField::ALL
                .iter()
                .map(|f| Field::new(f.name(), DataType::Float32, true))
                .collect::<Vec<_>>(),
        )
    }

    pub fn primary_label_field() -> Field {
        Field::new(PRIMARY_LABEL_COLUMN, DataType::Int32, false)
    }

    pub fn predicted_labels_field() -> Field {
        Field::new(
            PREDICTED_LABELS_COLUMN,
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::labels;

    #[test]
    fn label_vector_schema_has_expected_fields() {
        let schema = labels::label_vector_schema();
        assert_eq!(schema.fields().len(), 16);
        assert_eq!(schema.field(0).name(), "ir");
        assert_eq!(schema.field(15).name(), "irr");
        assert!(schema.field_with_name("gen_use").is_ok());
    }

    #[test]
    fn output_fields() {
        assert_eq!(labels::primary_label_field().name(), "primary_label");
        assert!(matches!(
            labels::predicted_labels_field().data_type(),
            arrow::datatypes::DataType::List(_)
        ));
    }
}
