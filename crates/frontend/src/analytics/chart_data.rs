//! Chart specs handed to the page's charting library.
//!
//! Only data and a few display hints are prepared here; styling is left to
//! the JS renderer.

use contracts::shared::analytics::{
    CellValue, ChannelPerformance, HourlySales, ResultSet, SalesTrend, TopProduct,
};
use serde::Serialize;

use crate::shared::components::table::format_column_name;
use crate::shared::date_utils::format_date;

pub const PALETTE: &[&str] = &[
    "#3498db", "#2ecc71", "#e74c3c", "#f39c12", "#9b59b6", "#1abc9c", "#34495e", "#d35400",
    "#c0392b", "#8e44ad", "#16a085", "#27ae60",
];

const PRODUCT_LABEL_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Area,
    Bar,
    Line,
    Donut,
    Pie,
}

/// How the renderer should format values on axes and tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Currency,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub colors: Vec<String>,
    pub value_format: ValueFormat,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub horizontal: bool,
}

fn palette(n: usize) -> Vec<String> {
    PALETTE.iter().cycle().take(n).map(|c| c.to_string()).collect()
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() > PRODUCT_LABEL_MAX_CHARS {
        let head: String = label.chars().take(PRODUCT_LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Daily revenue area chart; `None` without data points
pub fn revenue_trend(trends: &[SalesTrend]) -> Option<ChartSpec> {
    if trends.is_empty() {
        return None;
    }
    Some(ChartSpec {
        kind: ChartKind::Area,
        title: "Faturamento Diário".to_string(),
        labels: trends.iter().map(|t| format_date(&t.date)).collect(),
        series: vec![ChartSeries {
            name: "Faturamento Diário".to_string(),
            data: trends.iter().map(|t| t.revenue).collect(),
        }],
        colors: palette(1),
        value_format: ValueFormat::Currency,
        horizontal: false,
    })
}

/// Horizontal bars of quantity sold per product
pub fn top_products(products: &[TopProduct]) -> Option<ChartSpec> {
    if products.is_empty() {
        log::warn!("Sem dados de produtos");
        return None;
    }
    Some(ChartSpec {
        kind: ChartKind::Bar,
        title: "Produtos Mais Vendidos".to_string(),
        labels: products
            .iter()
            .map(|p| truncate_label(&p.product_name))
            .collect(),
        series: vec![ChartSeries {
            name: "Quantidade".to_string(),
            data: products.iter().map(|p| p.quantity_sold).collect(),
        }],
        colors: palette(products.len().min(10)),
        value_format: ValueFormat::Number,
        horizontal: true,
    })
}

/// Revenue share per channel
pub fn channel_mix(channels: &[ChannelPerformance]) -> Option<ChartSpec> {
    if channels.is_empty() {
        log::warn!("Sem dados de canais");
        return None;
    }
    Some(ChartSpec {
        kind: ChartKind::Donut,
        title: "Vendas por Canal".to_string(),
        labels: channels.iter().map(|c| c.channel_name.clone()).collect(),
        series: vec![ChartSeries {
            name: "Faturamento".to_string(),
            data: channels.iter().map(|c| c.revenue).collect(),
        }],
        colors: palette(channels.len().min(5)),
        value_format: ValueFormat::Currency,
        horizontal: false,
    })
}

/// Orders per hour of day
pub fn hourly_pattern(hourly: &[HourlySales]) -> Option<ChartSpec> {
    if hourly.is_empty() {
        return None;
    }
    Some(ChartSpec {
        kind: ChartKind::Line,
        title: "Pedidos por Hora do Dia".to_string(),
        labels: hourly.iter().map(|h| format!("{}h", h.hour)).collect(),
        series: vec![ChartSeries {
            name: "Pedidos".to_string(),
            data: hourly.iter().map(|h| h.orders as f64).collect(),
        }],
        colors: vec!["#e74c3c".to_string()],
        value_format: ValueFormat::Number,
        horizontal: false,
    })
}

fn cell_label(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Number(n)) => n.to_string(),
        None => String::new(),
    }
}

fn column_values(results: &ResultSet, column: &str) -> Vec<f64> {
    results
        .rows
        .iter()
        .map(|row| row.get(column).and_then(CellValue::as_number).unwrap_or(0.0))
        .collect()
}

/// Charts for an advanced-mode result.
///
/// A bar chart of the first numeric column that is not an average, labelled
/// by the first column; plus a pie chart when a text column exists and there
/// is more than one row.
pub fn result_charts(results: &ResultSet) -> Vec<ChartSpec> {
    let Some(first_row) = results.rows.first() else {
        return Vec::new();
    };

    let value_column = results.columns.iter().find(|c| {
        !c.contains("avg") && matches!(first_row.get(c.as_str()), Some(CellValue::Number(_)))
    });
    let Some(value_column) = value_column else {
        return Vec::new();
    };
    let label_column = &results.columns[0];
    let value_label = format_column_name(value_column);
    let values = column_values(results, value_column);
    let value_format = if value_column.contains("sales") || value_column.contains("ticket") {
        ValueFormat::Currency
    } else {
        ValueFormat::Number
    };

    let mut charts = vec![ChartSpec {
        kind: ChartKind::Bar,
        title: format!(
            "{} por {}",
            value_label,
            format_column_name(label_column)
        ),
        labels: results
            .rows
            .iter()
            .map(|row| cell_label(row.get(label_column)))
            .collect(),
        series: vec![ChartSeries {
            name: value_label.clone(),
            data: values.clone(),
        }],
        colors: palette(1),
        value_format,
        horizontal: false,
    }];

    let category_column = results
        .columns
        .iter()
        .find(|c| matches!(first_row.get(c.as_str()), Some(CellValue::Text(_))));
    if let Some(category_column) = category_column.filter(|_| results.len() > 1) {
        charts.push(ChartSpec {
            kind: ChartKind::Pie,
            title: format!(
                "Distribuição de {}",
                format_column_name(value_column)
            ),
            labels: results
                .rows
                .iter()
                .map(|row| cell_label(row.get(category_column)))
                .collect(),
            series: vec![ChartSeries {
                name: value_label,
                data: values,
            }],
            colors: palette(results.len()),
            value_format,
            horizontal: false,
        });
    }

    charts
}
