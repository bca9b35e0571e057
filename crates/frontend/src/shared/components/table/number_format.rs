//! Number formatting for tables and KPI cards (pt-BR conventions)
//!
//! Thousands are separated with `.`, decimals with `,`.

use contracts::shared::analytics::CellValue;

/// Formats a number with thousands separators and a fixed number of decimals
///
/// # Examples
///
/// ```
/// use frontend::shared::components::table::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.*}", decimals as usize, value.abs());
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (formatted.as_str(), None),
    };

    // Insert a dot every 3 digits from the end of the integer part
    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Currency in Brazilian reais: `R$ 1.234,56`
///
/// ```
/// use frontend::shared::components::table::format_currency;
/// assert_eq!(format_currency(1234.56), "R$ 1.234,56");
/// ```
pub fn format_currency(value: f64) -> String {
    let amount = format_number_with_decimals(value, 2);
    match amount.strip_prefix('-') {
        Some(abs) => format!("-R$ {}", abs),
        None => format!("R$ {}", amount),
    }
}

/// General number: up to 3 fraction digits, trailing zeros dropped
pub fn format_number(value: f64) -> String {
    let formatted = format_number_with_decimals(value, 3);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches(',');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Integer with thousands separators
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// KPI change indicator text: `+12.3%`, `-4.0%`, `±0%`
pub fn format_percent_change(change: f64) -> String {
    if change == 0.0 {
        return "±0%".to_string();
    }
    let symbol = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", symbol, change)
}

/// Human label of a result column; unknown keys are returned as-is
pub fn format_column_name(column: &str) -> String {
    let label = match column {
        "total_sales" => "Vendas Totais",
        "order_count" => "Nº de Pedidos",
        "avg_ticket" => "Ticket Médio",
        "unique_customers" => "Clientes Únicos",
        "product_name" => "Produto",
        "channel" => "Canal",
        "quantity" => "Quantidade",
        "category" => "Categoria",
        "store" => "Loja",
        "payment_type" => "Tipo Pagamento",
        "date" => "Data",
        other => other,
    };
    label.to_string()
}

/// Whether a numeric column holds money
pub fn is_money_column(column: &str) -> bool {
    column.contains("sales") || column.contains("ticket")
}

/// Cell text for the result table: money columns as currency, other numbers
/// with grouping, text verbatim
pub fn format_cell(column: &str, value: &CellValue) -> String {
    match value {
        CellValue::Number(n) if is_money_column(column) => format_currency(*n),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-1234.5), "-R$ 1.234,50");
        assert_eq!(format_currency(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1.234,567");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.0), "1.234");
        assert_eq!(format_number(1234.5), "1.234,5");
        assert_eq!(format_number(0.1234), "0,123");
        assert_eq!(format_number(-1500000.0), "-1.500.000");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1.234.567");
        assert_eq!(format_number_int(-1234.0), "-1.234");
    }

    #[test]
    fn test_format_percent_change() {
        assert_eq!(format_percent_change(12.34), "+12.3%");
        assert_eq!(format_percent_change(-4.0), "-4.0%");
        assert_eq!(format_percent_change(0.0), "±0%");
    }

    #[test]
    fn test_format_column_name() {
        assert_eq!(format_column_name("total_sales"), "Vendas Totais");
        assert_eq!(format_column_name("quantity"), "Quantidade");
        assert_eq!(format_column_name("weird_column"), "weird_column");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(
            format_cell("total_sales", &CellValue::Number(1500.0)),
            "R$ 1.500,00"
        );
        assert_eq!(format_cell("avg_ticket", &CellValue::Number(42.5)), "R$ 42,50");
        assert_eq!(format_cell("order_count", &CellValue::Number(1200.0)), "1.200");
        assert_eq!(format_cell("channel", &CellValue::Text("iFood".into())), "iFood");
    }
}
