use serde::{Deserialize, Serialize};

/// Kind of a draggable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Dimension,
    Measure,
    Filter,
}

/// Aggregation applied to a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl Aggregation {
    /// SQL keyword (uppercase)
    pub fn keyword(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Avg => "AVG",
            Aggregation::Count => "COUNT",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
        }
    }
}

/// Reference to a field placed into a drop zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

impl FieldRef {
    pub fn dimension(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FieldKind::Dimension,
            aggregation: None,
        }
    }

    pub fn measure(field: impl Into<String>, aggregation: Aggregation) -> Self {
        Self {
            field: field.into(),
            kind: FieldKind::Measure,
            aggregation: Some(aggregation),
        }
    }

    /// Label shown on the chip, e.g. "SUM(total_sales)"
    pub fn display_text(&self) -> String {
        match self.aggregation {
            Some(agg) => format!("{}({})", agg.keyword(), self.field),
            None => self.field.clone(),
        }
    }
}

/// Comparison operator of a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "IN")]
    In,
}

impl FilterOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::NotEq => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::GtEq => ">=",
            FilterOperator::LtEq => "<=",
            FilterOperator::Like => "LIKE",
            FilterOperator::In => "IN",
        }
    }

    /// Parse from the symbol used in the operator dropdown
    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|op| op.symbol() == s)
    }

    /// Operators in dropdown order
    pub fn all() -> &'static [FilterOperator] {
        &[
            FilterOperator::Eq,
            FilterOperator::NotEq,
            FilterOperator::Gt,
            FilterOperator::Lt,
            FilterOperator::GtEq,
            FilterOperator::LtEq,
            FilterOperator::Like,
            FilterOperator::In,
        ]
    }
}

/// Effective filter predicate: field OP 'value'
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

/// Current selection of the advanced mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default)]
    pub dimensions: Vec<FieldRef>,
    #[serde(default)]
    pub measures: Vec<FieldRef>,
    #[serde(default)]
    pub filters: Vec<FilterClause>,
}

impl QuerySpec {
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.measures.is_empty()
    }

    pub fn has_dimension(&self, field: &str) -> bool {
        self.dimensions.iter().any(|d| d.field == field)
    }

    pub fn has_measure(&self, field: &str) -> bool {
        self.measures.iter().any(|m| m.field == field)
    }
}

/// Body of `POST /analytics/custom-query`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomQueryRequest {
    pub dimensions: Vec<FieldRef>,
    pub measures: Vec<FieldRef>,
    pub filters: Vec<FilterClause>,
}

impl From<QuerySpec> for CustomQueryRequest {
    fn from(spec: QuerySpec) -> Self {
        Self {
            dimensions: spec.dimensions,
            measures: spec.measures,
            filters: spec.filters,
        }
    }
}
