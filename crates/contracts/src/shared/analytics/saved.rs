use serde::{Deserialize, Serialize};

use super::query::QuerySpec;

/// Entry of the saved-query list kept in browser local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    /// User-defined name
    pub name: String,
    pub query: QuerySpec,
    /// RFC 3339 creation timestamp
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::{Aggregation, FieldRef};

    #[test]
    fn test_saved_query_json_shape() {
        let saved = SavedQuery {
            name: "Vendas por canal".to_string(),
            query: QuerySpec {
                dimensions: vec![FieldRef::dimension("channel")],
                measures: vec![FieldRef::measure("total_sales", Aggregation::Sum)],
                filters: vec![],
            },
            timestamp: "2024-01-31T12:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["name"], "Vendas por canal");
        assert_eq!(json["query"]["dimensions"][0]["field"], "channel");
        assert_eq!(json["query"]["measures"][0]["aggregation"], "sum");

        let back: SavedQuery = serde_json::from_value(json).unwrap();
        assert_eq!(back, saved);
    }
}
