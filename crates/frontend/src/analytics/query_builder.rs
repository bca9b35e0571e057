//! Advanced-mode query state and its SQL-like preview.
//!
//! The preview is display text only. It is never sent anywhere, so filter
//! values are interpolated as typed.

use contracts::shared::analytics::{
    Aggregation, CustomQueryRequest, FieldKind, FieldRef, FilterClause, FilterOperator, QuerySpec,
};

/// Shown instead of a query while no field is selected
pub const EMPTY_PREVIEW_TEXT: &str = "Adicione campos para ver a preview da query";

/// Shown when execution is requested with nothing selected
pub const NOTHING_SELECTED_ERROR: &str =
    "Adicione pelo menos uma dimensão ou medida para executar a query";

/// Drop zone of the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Dimensions,
    Measures,
}

impl Area {
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Dimensions => "dimensions",
            Area::Measures => "measures",
        }
    }

    /// Placeholder of an empty drop zone
    pub fn empty_text(&self) -> &'static str {
        match self {
            Area::Dimensions => "Solte dimensões aqui...",
            Area::Measures => "Solte medidas aqui...",
        }
    }
}

/// Entry of the draggable field palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogField {
    pub field: &'static str,
    pub label: &'static str,
    pub aggregation: Option<Aggregation>,
}

impl CatalogField {
    pub fn to_field_ref(&self) -> FieldRef {
        match self.aggregation {
            Some(agg) => FieldRef::measure(self.field, agg),
            None => FieldRef::dimension(self.field),
        }
    }
}

pub const DIMENSION_CATALOG: &[CatalogField] = &[
    CatalogField { field: "channel", label: "Canal", aggregation: None },
    CatalogField { field: "product_name", label: "Produto", aggregation: None },
    CatalogField { field: "category", label: "Categoria", aggregation: None },
    CatalogField { field: "store", label: "Loja", aggregation: None },
    CatalogField { field: "payment_type", label: "Tipo Pagamento", aggregation: None },
];

pub const MEASURE_CATALOG: &[CatalogField] = &[
    CatalogField {
        field: "total_sales",
        label: "Vendas Totais",
        aggregation: Some(Aggregation::Sum),
    },
    CatalogField {
        field: "order_count",
        label: "Nº de Pedidos",
        aggregation: Some(Aggregation::Count),
    },
    CatalogField {
        field: "avg_ticket",
        label: "Ticket Médio",
        aggregation: Some(Aggregation::Avg),
    },
    CatalogField {
        field: "quantity",
        label: "Quantidade",
        aggregation: Some(Aggregation::Sum),
    },
    CatalogField {
        field: "unique_customers",
        label: "Clientes Únicos",
        aggregation: Some(Aggregation::Count),
    },
];

/// (field, label) pairs offered by the filter field dropdown
pub const FILTER_FIELDS: &[(&str, &str)] = &[
    ("date", "Data"),
    ("product_name", "Produto"),
    ("category", "Categoria"),
    ("channel", "Canal"),
    ("store", "Loja"),
    ("payment_type", "Tipo Pagamento"),
];

/// Filter row as edited in the UI; may be incomplete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Default for FilterRow {
    fn default() -> Self {
        Self {
            field: String::new(),
            operator: FilterOperator::Eq,
            value: String::new(),
        }
    }
}

impl FilterRow {
    fn to_clause(&self) -> Option<FilterClause> {
        if self.field.is_empty() || self.value.is_empty() {
            return None;
        }
        Some(FilterClause {
            field: self.field.clone(),
            operator: self.operator,
            value: self.value.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    query: QuerySpec,
    filter_rows: Vec<FilterRow>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &QuerySpec {
        &self.query
    }

    pub fn filter_rows(&self) -> &[FilterRow] {
        &self.filter_rows
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    fn area(&self, area: Area) -> &Vec<FieldRef> {
        match area {
            Area::Dimensions => &self.query.dimensions,
            Area::Measures => &self.query.measures,
        }
    }

    fn area_mut(&mut self, area: Area) -> &mut Vec<FieldRef> {
        match area {
            Area::Dimensions => &mut self.query.dimensions,
            Area::Measures => &mut self.query.measures,
        }
    }

    pub fn fields(&self, area: Area) -> &[FieldRef] {
        self.area(area)
    }

    pub fn is_area_empty(&self, area: Area) -> bool {
        self.area(area).is_empty()
    }

    /// Append a field; a `(field, kind)` pair already in the area is ignored.
    /// Returns whether the field was added.
    pub fn add_field(&mut self, field_ref: FieldRef, area: Area) -> bool {
        let list = self.area_mut(area);
        if list
            .iter()
            .any(|f| f.field == field_ref.field && f.kind == field_ref.kind)
        {
            return false;
        }
        list.push(field_ref);
        true
    }

    /// Remove the field named `field_name` from `area`. Returns whether anything was removed.
    pub fn remove_field(&mut self, area: Area, field_name: &str) -> bool {
        let list = self.area_mut(area);
        match list.iter().position(|f| f.field == field_name) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Append an empty filter row; returns its index
    pub fn add_filter_row(&mut self) -> usize {
        self.filter_rows.push(FilterRow::default());
        self.refresh_filters();
        self.filter_rows.len() - 1
    }

    /// Replace the content of row `index`. Out-of-range indexes are ignored.
    pub fn set_filter(
        &mut self,
        index: usize,
        field: &str,
        operator: FilterOperator,
        value: &str,
    ) -> bool {
        let Some(row) = self.filter_rows.get_mut(index) else {
            return false;
        };
        row.field = field.trim().to_string();
        row.operator = operator;
        row.value = value.to_string();
        self.refresh_filters();
        true
    }

    pub fn remove_filter_row(&mut self, index: usize) -> bool {
        if index >= self.filter_rows.len() {
            return false;
        }
        self.filter_rows.remove(index);
        self.refresh_filters();
        true
    }

    /// Rebuild the effective filters from every complete row, in row order
    fn refresh_filters(&mut self) {
        self.query.filters = self
            .filter_rows
            .iter()
            .filter_map(FilterRow::to_clause)
            .collect();
    }

    /// Empty strings unset the bound
    pub fn set_date_range(&mut self, start_date: Option<&str>, end_date: Option<&str>) {
        let normalize = |d: Option<&str>| {
            d.map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
        };
        self.start_date = normalize(start_date);
        self.end_date = normalize(end_date);
    }

    /// Drop every field and filter row. The date range stays.
    pub fn clear(&mut self) {
        self.query = QuerySpec::default();
        self.filter_rows.clear();
    }

    /// Restore a saved query. Its filters become complete rows.
    pub fn load(&mut self, query: QuerySpec) {
        self.filter_rows = query
            .filters
            .iter()
            .map(|f| FilterRow {
                field: f.field.clone(),
                operator: f.operator,
                value: f.value.clone(),
            })
            .collect();
        self.query = query;
        self.refresh_filters();
    }

    pub fn can_execute(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn custom_query_request(&self) -> CustomQueryRequest {
        CustomQueryRequest::from(self.query.clone())
    }

    pub fn render_preview(&self) -> String {
        if self.query.is_empty() {
            return EMPTY_PREVIEW_TEXT.to_string();
        }

        let mut sql = String::from("SELECT ");
        if self.query.measures.is_empty() {
            sql.push('*');
        } else {
            let select: Vec<String> = self.query.measures.iter().map(select_item).collect();
            sql.push_str(&select.join(", "));
        }

        sql.push_str(" FROM sales WHERE 1=1");
        if let Some(start) = &self.start_date {
            sql.push_str(&format!(" AND date >= '{}'", start));
        }
        if let Some(end) = &self.end_date {
            sql.push_str(&format!(" AND date <= '{}'", end));
        }
        for filter in &self.query.filters {
            sql.push_str(&format!(
                " AND {} {} '{}'",
                filter.field,
                filter.operator.symbol(),
                filter.value
            ));
        }

        if !self.query.dimensions.is_empty() {
            let group_by: Vec<&str> = self
                .query
                .dimensions
                .iter()
                .map(|d| d.field.as_str())
                .collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&group_by.join(", "));
        }

        if let Some(first) = self.query.measures.first() {
            sql.push_str(&format!(" ORDER BY {} DESC", first.field));
        }

        sql
    }
}

fn select_item(measure: &FieldRef) -> String {
    match measure.aggregation {
        Some(agg) => format!("{}({}) as {}", agg.keyword(), measure.field, measure.field),
        None => measure.field.clone(),
    }
}

/// Kind a field must have to be dropped into `area`
pub fn area_kind(area: Area) -> FieldKind {
    match area {
        Area::Dimensions => FieldKind::Dimension,
        Area::Measures => FieldKind::Measure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_by_sales() -> QueryBuilder {
        let mut builder = QueryBuilder::new();
        builder.add_field(FieldRef::dimension("channel"), Area::Dimensions);
        builder.add_field(
            FieldRef::measure("total_sales", Aggregation::Sum),
            Area::Measures,
        );
        builder
    }

    #[test]
    fn test_empty_builder_shows_placeholder() {
        let mut builder = QueryBuilder::new();
        builder.set_date_range(Some("2024-01-01"), Some("2024-01-31"));
        assert_eq!(builder.render_preview(), EMPTY_PREVIEW_TEXT);
        assert!(!builder.can_execute());
    }

    #[test]
    fn test_preview_with_dates_group_and_order() {
        let mut builder = channel_by_sales();
        builder.set_date_range(Some("2024-01-01"), Some("2024-01-31"));
        assert_eq!(
            builder.render_preview(),
            "SELECT SUM(total_sales) as total_sales FROM sales WHERE 1=1 \
             AND date >= '2024-01-01' AND date <= '2024-01-31' \
             GROUP BY channel ORDER BY total_sales DESC"
        );
    }

    #[test]
    fn test_preview_dimensions_only_selects_star() {
        let mut builder = QueryBuilder::new();
        builder.add_field(FieldRef::dimension("store"), Area::Dimensions);
        builder.add_field(FieldRef::dimension("channel"), Area::Dimensions);
        assert_eq!(
            builder.render_preview(),
            "SELECT * FROM sales WHERE 1=1 GROUP BY store, channel"
        );
    }

    #[test]
    fn test_preview_measures_order_by_first() {
        let mut builder = QueryBuilder::new();
        builder.add_field(
            FieldRef::measure("order_count", Aggregation::Count),
            Area::Measures,
        );
        builder.add_field(
            FieldRef::measure("avg_ticket", Aggregation::Avg),
            Area::Measures,
        );
        builder.set_date_range(None, Some("2024-03-31"));
        assert_eq!(
            builder.render_preview(),
            "SELECT COUNT(order_count) as order_count, AVG(avg_ticket) as avg_ticket \
             FROM sales WHERE 1=1 AND date <= '2024-03-31' ORDER BY order_count DESC"
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut builder = channel_by_sales();
        assert!(!builder.add_field(FieldRef::dimension("channel"), Area::Dimensions));
        assert_eq!(builder.fields(Area::Dimensions).len(), 1);
        let before = builder.render_preview();
        builder.add_field(
            FieldRef::measure("total_sales", Aggregation::Sum),
            Area::Measures,
        );
        assert_eq!(builder.render_preview(), before);
    }

    #[test]
    fn test_remove_absent_is_noop_and_last_removal_empties_area() {
        let mut builder = channel_by_sales();
        let before = builder.clone();
        assert!(!builder.remove_field(Area::Dimensions, "store"));
        assert_eq!(builder, before);

        assert!(builder.remove_field(Area::Dimensions, "channel"));
        assert!(builder.is_area_empty(Area::Dimensions));
        assert!(!builder.is_area_empty(Area::Measures));
    }

    #[test]
    fn test_partial_filter_rows_are_ignored() {
        let mut builder = channel_by_sales();
        let row = builder.add_filter_row();
        assert!(builder.query().filters.is_empty());

        builder.set_filter(row, "store", FilterOperator::Eq, "Centro");
        assert_eq!(builder.query().filters.len(), 1);
        assert!(builder
            .render_preview()
            .contains(" AND store = 'Centro' GROUP BY channel"));

        builder.set_filter(row, "store", FilterOperator::Eq, "");
        assert!(builder.query().filters.is_empty());
        assert!(!builder.render_preview().contains("store"));
        assert_eq!(builder.filter_rows().len(), 1);
    }

    #[test]
    fn test_filters_keep_row_order_and_are_not_escaped() {
        let mut builder = channel_by_sales();
        let first = builder.add_filter_row();
        let second = builder.add_filter_row();
        builder.set_filter(second, "product_name", FilterOperator::Like, "%O'Brien%");
        builder.set_filter(first, "channel", FilterOperator::NotEq, "iFood");

        assert!(builder.render_preview().contains(
            "WHERE 1=1 AND channel != 'iFood' AND product_name LIKE '%O'Brien%'"
        ));

        assert!(builder.remove_filter_row(first));
        assert_eq!(builder.query().filters[0].field, "product_name");
        assert!(!builder.remove_filter_row(5));
        assert!(!builder.set_filter(5, "store", FilterOperator::Eq, "x"));
    }

    #[test]
    fn test_clear_keeps_dates() {
        let mut builder = channel_by_sales();
        builder.set_date_range(Some("2024-01-01"), Some(""));
        builder.add_filter_row();
        builder.clear();

        assert_eq!(builder.render_preview(), EMPTY_PREVIEW_TEXT);
        assert!(builder.filter_rows().is_empty());
        assert_eq!(builder.start_date(), Some("2024-01-01"));
        assert_eq!(builder.end_date(), None);
    }

    #[test]
    fn test_load_restores_filter_rows() {
        let mut source = channel_by_sales();
        let row = source.add_filter_row();
        source.set_filter(row, "channel", FilterOperator::Eq, "Balcão");
        let saved = source.query().clone();

        let mut builder = QueryBuilder::new();
        builder.load(saved.clone());
        assert_eq!(builder.query(), &saved);
        assert_eq!(builder.filter_rows().len(), 1);
        assert_eq!(builder.filter_rows()[0].value, "Balcão");

        let request = builder.custom_query_request();
        assert_eq!(request.dimensions, saved.dimensions);
        assert_eq!(request.filters, saved.filters);
    }

    #[test]
    fn test_measure_without_aggregation_renders_bare_field() {
        let mut builder = QueryBuilder::new();
        builder.add_field(
            FieldRef {
                field: "quantity".to_string(),
                kind: FieldKind::Measure,
                aggregation: None,
            },
            Area::Measures,
        );
        assert!(builder
            .render_preview()
            .starts_with("SELECT quantity FROM sales"));
    }

    #[test]
    fn test_catalog_entries_match_their_area() {
        for entry in DIMENSION_CATALOG {
            assert_eq!(entry.to_field_ref().kind, area_kind(Area::Dimensions));
        }
        for entry in MEASURE_CATALOG {
            assert_eq!(entry.to_field_ref().kind, area_kind(Area::Measures));
            assert!(entry.aggregation.is_some());
        }
    }
}
