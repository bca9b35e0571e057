use serde::{Deserialize, Serialize};

/// Full payload of `GET /analytics/dashboard` for a date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub overview: KpiOverview,
    #[serde(default)]
    pub sales_trends: Vec<SalesTrend>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    #[serde(default)]
    pub channel_performance: Vec<ChannelPerformance>,
    #[serde(default)]
    pub hourly_sales: Vec<HourlySales>,
}

/// Headline KPIs for the period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiOverview {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub avg_ticket: f64,
    #[serde(default)]
    pub unique_customers: i64,
    /// Change vs. previous period, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_change: Option<f64>,
    /// Change vs. previous period, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders_change: Option<f64>,
}

/// One point of the revenue trend (date in YYYY-MM-DD)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTrend {
    pub date: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub avg_ticket: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(default)]
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub quantity_sold: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    #[serde(default)]
    pub channel_id: i64,
    pub channel_name: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub avg_ticket: f64,
}

/// Sales aggregated by hour of day (0..=23)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySales {
    pub hour: u32,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub avg_ticket: f64,
}

/// Envelope of `GET /analytics/top-products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopProductsResponse {
    #[serde(default)]
    pub products: Vec<TopProduct>,
}

/// Envelope of `GET /analytics/channel-performance`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelPerformanceResponse {
    #[serde(default)]
    pub channels: Vec<ChannelPerformance>,
}

/// Envelope of `GET /analytics/sales-trends`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesTrendsResponse {
    #[serde(default)]
    pub trends: Vec<SalesTrend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_missing_sections_default_to_empty() {
        let json = r#"{"overview": {"total_revenue": 1500.5, "total_orders": 30}}"#;
        let snapshot: DashboardSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.overview.total_revenue, 1500.5);
        assert_eq!(snapshot.overview.total_orders, 30);
        assert_eq!(snapshot.overview.revenue_change, None);
        assert!(snapshot.sales_trends.is_empty());
        assert!(snapshot.top_products.is_empty());
        assert!(snapshot.channel_performance.is_empty());
        assert!(snapshot.hourly_sales.is_empty());
    }

    #[test]
    fn test_envelope_without_key_is_empty() {
        let products: TopProductsResponse = serde_json::from_str(r#"{"detail": "boom"}"#).unwrap();
        assert!(products.products.is_empty());

        let channels: ChannelPerformanceResponse =
            serde_json::from_str(r#"{"channels": [{"channel_name": "iFood", "revenue": 10.0}]}"#)
                .unwrap();
        assert_eq!(channels.channels.len(), 1);
        assert_eq!(channels.channels[0].channel_name, "iFood");
        assert_eq!(channels.channels[0].orders, 0);
    }
}
