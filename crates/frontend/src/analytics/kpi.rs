//! Headline KPIs and the metrics derived from them.

use contracts::shared::analytics::KpiOverview;

use crate::shared::components::table::{format_currency, format_number_int, format_percent_change};

/// Direction of a change indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeIndicator {
    pub text: String,
    pub trend: Trend,
}

impl ChangeIndicator {
    /// A missing change reads as no change
    pub fn from_change(change: Option<f64>) -> Self {
        let change = change.unwrap_or(0.0);
        let trend = if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        };
        Self {
            text: format_percent_change(change),
            trend,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.trend {
            Trend::Up => "kpi-change",
            Trend::Down => "kpi-change negative",
            Trend::Flat => "kpi-change",
        }
    }
}

/// One KPI card, ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub label: &'static str,
    pub icon: &'static str,
    pub value: String,
    pub change: ChangeIndicator,
}

pub fn kpi_cards(overview: &KpiOverview) -> Vec<KpiCard> {
    vec![
        KpiCard {
            label: "Faturamento Total",
            icon: "revenue",
            value: format_currency(overview.total_revenue),
            change: ChangeIndicator::from_change(overview.revenue_change),
        },
        KpiCard {
            label: "Total de Pedidos",
            icon: "orders",
            value: format_number_int(overview.total_orders as f64),
            change: ChangeIndicator::from_change(overview.orders_change),
        },
        KpiCard {
            label: "Ticket Médio",
            icon: "ticket",
            value: format_currency(overview.avg_ticket),
            change: ChangeIndicator::from_change(None),
        },
        KpiCard {
            label: "Clientes Únicos",
            icon: "customers",
            value: format_number_int(overview.unique_customers as f64),
            change: ChangeIndicator::from_change(None),
        },
    ]
}

/// Per-day averages over the selected range
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub orders_per_day: i64,
    pub revenue_per_day: f64,
    pub customers_per_day: i64,
    /// unique customers / orders, in percent, capped at 100
    pub retention_rate: u32,
    pub growth: Option<f64>,
}

impl DerivedMetrics {
    pub fn compute(overview: &KpiOverview, days: i64) -> Self {
        let days = days.max(1) as f64;
        let retention_rate = if overview.total_orders > 0 {
            let ratio = overview.unique_customers as f64 / overview.total_orders as f64;
            ((ratio * 100.0).round() as u32).min(100)
        } else {
            0
        };

        Self {
            orders_per_day: (overview.total_orders as f64 / days).round() as i64,
            revenue_per_day: overview.total_revenue / days,
            customers_per_day: (overview.unique_customers as f64 / days).round() as i64,
            retention_rate,
            growth: overview.revenue_change,
        }
    }

    /// (label, text) rows of the metrics panel
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Pedidos por dia", format_number_int(self.orders_per_day as f64)),
            (
                "Faturamento por dia",
                format!("R$ {}", format_number_int(self.revenue_per_day.round())),
            ),
            (
                "Clientes por dia",
                format_number_int(self.customers_per_day as f64),
            ),
            ("Taxa de retenção", format!("{}%", self.retention_rate)),
            (
                "Crescimento",
                format_percent_change(self.growth.unwrap_or(0.0)),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview() -> KpiOverview {
        KpiOverview {
            total_revenue: 45000.0,
            total_orders: 900,
            avg_ticket: 50.0,
            unique_customers: 300,
            revenue_change: Some(12.34),
            orders_change: Some(-4.0),
        }
    }

    #[test]
    fn test_derived_metrics_over_thirty_days() {
        let metrics = DerivedMetrics::compute(&overview(), 30);
        assert_eq!(metrics.orders_per_day, 30);
        assert_eq!(metrics.revenue_per_day, 1500.0);
        assert_eq!(metrics.customers_per_day, 10);
        assert_eq!(metrics.retention_rate, 33);
        assert_eq!(metrics.rows()[1].1, "R$ 1.500");
        assert_eq!(metrics.rows()[4].1, "+12.3%");
    }

    #[test]
    fn test_retention_is_capped_and_safe_without_orders() {
        let mut o = overview();
        o.unique_customers = 2000;
        assert_eq!(DerivedMetrics::compute(&o, 30).retention_rate, 100);

        o.total_orders = 0;
        let metrics = DerivedMetrics::compute(&o, 0);
        assert_eq!(metrics.retention_rate, 0);
        assert_eq!(metrics.orders_per_day, 0);
    }

    #[test]
    fn test_kpi_cards() {
        let cards = kpi_cards(&overview());
        assert_eq!(cards[0].value, "R$ 45.000,00");
        assert_eq!(cards[0].change.text, "+12.3%");
        assert_eq!(cards[1].value, "900");
        assert_eq!(cards[1].change.trend, Trend::Down);
        assert_eq!(cards[1].change.css_class(), "kpi-change negative");
        assert_eq!(cards[2].change.text, "±0%");
    }
}
