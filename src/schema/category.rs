// Field type classification
// Author: Gabriel Demetrios Lafis

/// Semantic category of a declared field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    Boolean,
    Integer,
    Float,
    Text,
    Date,
    DateTime,
    Identifier,
}

impl FieldCategory {
    /// Check whether free-text search may target fields of this category
    pub fn is_searchable(&self) -> bool {
        matches!(self, FieldCategory::Text)
    }

    /// Check whether the category carries a numeric value
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldCategory::Integer | FieldCategory::Float)
    }

    /// Check whether the category carries a calendar value
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldCategory::Date | FieldCategory::DateTime)
    }
}

/// Classify a declared type name into its semantic category.
///
/// Matching is case-insensitive and substring based, checked in priority
/// order: an exact `boolean` match, identifier types (`uuid`, `serial`),
/// the integer family (`int`), the floating family (`float`, `decimal`,
/// `numeric`), `datetime`/`timestamp` before the broader `date`, then the
/// text family. Unknown type names classify as Text, so the function is
/// total and never fails.
pub fn classify(declared_type: &str) -> FieldCategory {
    let t = declared_type.trim().to_ascii_lowercase();

    if t == "boolean" {
        FieldCategory::Boolean
    } else if t.contains("uuid") || t.contains("serial") {
        FieldCategory::Identifier
    } else if t.contains("int") {
        FieldCategory::Integer
    } else if t.contains("float") || t.contains("decimal") || t.contains("numeric") {
        FieldCategory::Float
    } else if t.contains("datetime") || t.contains("timestamp") {
        FieldCategory::DateTime
    } else if t.contains("date") {
        FieldCategory::Date
    } else if t.contains("text") || t.contains("varchar") || t.contains("char") || t.contains("string") {
        FieldCategory::Text
    } else {
        FieldCategory::Text
    }
}
