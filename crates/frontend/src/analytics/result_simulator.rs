//! Derives an approximate result table from a dashboard snapshot.
//!
//! There is no query engine behind the advanced mode: the selected fields pick
//! one of three fixed shapes of the snapshot.

use contracts::shared::analytics::{CellValue, DashboardSnapshot, QuerySpec, ResultRow, ResultSet};

/// Which part of the snapshot a query is answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationSource {
    Channels,
    Products,
    Overview,
}

impl SimulationSource {
    pub fn for_query(query: &QuerySpec) -> Self {
        if query.has_dimension("channel") && query.has_measure("total_sales") {
            SimulationSource::Channels
        } else if query.has_dimension("product_name") {
            SimulationSource::Products
        } else {
            SimulationSource::Overview
        }
    }
}

pub fn simulate(snapshot: &DashboardSnapshot, query: &QuerySpec) -> Vec<ResultRow> {
    match SimulationSource::for_query(query) {
        SimulationSource::Channels => snapshot
            .channel_performance
            .iter()
            .map(|channel| {
                let mut row = ResultRow::new().with("channel", channel.channel_name.as_str());
                for measure in &query.measures {
                    let value: Option<CellValue> = match measure.field.as_str() {
                        "total_sales" => Some(channel.revenue.into()),
                        "order_count" => Some(channel.orders.into()),
                        "avg_ticket" => Some(channel.avg_ticket.into()),
                        _ => None,
                    };
                    if let Some(value) = value {
                        row.insert(measure.field.as_str(), value);
                    }
                }
                row
            })
            .collect(),

        SimulationSource::Products => snapshot
            .top_products
            .iter()
            .map(|product| {
                let mut row =
                    ResultRow::new().with("product_name", product.product_name.as_str());
                for measure in &query.measures {
                    let value: Option<CellValue> = match measure.field.as_str() {
                        "quantity" => Some(product.quantity_sold.into()),
                        "total_sales" => Some(product.revenue.into()),
                        _ => None,
                    };
                    if let Some(value) = value {
                        row.insert(measure.field.as_str(), value);
                    }
                }
                row
            })
            .collect(),

        SimulationSource::Overview => {
            let overview = &snapshot.overview;
            let mut row = ResultRow::new();
            for measure in &query.measures {
                let value: Option<CellValue> = match measure.field.as_str() {
                    "total_sales" => Some(overview.total_revenue.into()),
                    "order_count" => Some(overview.total_orders.into()),
                    "avg_ticket" => Some(overview.avg_ticket.into()),
                    "unique_customers" => Some(overview.unique_customers.into()),
                    _ => None,
                };
                if let Some(value) = value {
                    row.insert(measure.field.as_str(), value);
                }
            }
            vec![row]
        }
    }
}

/// Simulated rows wrapped with their column set
pub fn simulate_result_set(snapshot: &DashboardSnapshot, query: &QuerySpec) -> ResultSet {
    ResultSet::from_rows(simulate(snapshot, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::analytics::{
        Aggregation, ChannelPerformance, FieldRef, KpiOverview, TopProduct,
    };

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            overview: KpiOverview {
                total_revenue: 15000.0,
                total_orders: 300,
                avg_ticket: 50.0,
                unique_customers: 120,
                ..Default::default()
            },
            top_products: vec![TopProduct {
                product_name: "X".to_string(),
                quantity_sold: 5.0,
                revenue: 75.0,
                ..Default::default()
            }],
            channel_performance: vec![
                ChannelPerformance {
                    channel_name: "iFood".to_string(),
                    revenue: 9000.0,
                    orders: 180,
                    avg_ticket: 50.0,
                    ..Default::default()
                },
                ChannelPerformance {
                    channel_name: "Balcão".to_string(),
                    revenue: 6000.0,
                    orders: 120,
                    avg_ticket: 50.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn query(dimensions: &[&str], measures: &[(&str, Aggregation)]) -> QuerySpec {
        QuerySpec {
            dimensions: dimensions.iter().map(|d| FieldRef::dimension(*d)).collect(),
            measures: measures
                .iter()
                .map(|(m, agg)| FieldRef::measure(*m, *agg))
                .collect(),
            filters: vec![],
        }
    }

    #[test]
    fn test_products_branch() {
        let rows = simulate(
            &snapshot(),
            &query(&["product_name"], &[("quantity", Aggregation::Sum)]),
        );
        assert_eq!(
            rows,
            vec![ResultRow::new().with("product_name", "X").with("quantity", 5.0)]
        );
    }

    #[test]
    fn test_channels_branch_follows_measure_order() {
        let q = query(
            &["channel"],
            &[
                ("order_count", Aggregation::Count),
                ("total_sales", Aggregation::Sum),
            ],
        );
        assert_eq!(SimulationSource::for_query(&q), SimulationSource::Channels);

        let set = simulate_result_set(&snapshot(), &q);
        assert_eq!(set.columns, vec!["channel", "order_count", "total_sales"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[1].get("channel"), Some(&CellValue::from("Balcão")));
        assert_eq!(set.rows[1].get("order_count"), Some(&CellValue::Number(120.0)));
    }

    #[test]
    fn test_channel_without_total_sales_falls_back_to_overview() {
        let q = query(&["channel"], &[("order_count", Aggregation::Count)]);
        assert_eq!(SimulationSource::for_query(&q), SimulationSource::Overview);
        let rows = simulate(&snapshot(), &q);
        assert_eq!(rows, vec![ResultRow::new().with("order_count", 300_i64)]);
    }

    #[test]
    fn test_overview_branch_only_requested_measures() {
        let q = query(
            &[],
            &[
                ("unique_customers", Aggregation::Count),
                ("total_sales", Aggregation::Sum),
                ("quantity", Aggregation::Sum),
            ],
        );
        let set = simulate_result_set(&snapshot(), &q);
        assert_eq!(set.columns, vec!["unique_customers", "total_sales"]);
        assert_eq!(set.rows[0].get("total_sales"), Some(&CellValue::Number(15000.0)));
    }

    #[test]
    fn test_empty_snapshot_lists_yield_no_rows() {
        let q = query(&["product_name"], &[("total_sales", Aggregation::Sum)]);
        assert!(simulate(&DashboardSnapshot::default(), &q).is_empty());
    }
}
