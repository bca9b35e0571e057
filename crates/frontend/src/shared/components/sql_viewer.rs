use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

/// Query preview panel. Text that is not a query (the empty-state
/// placeholder) is shown as a muted hint.
#[component]
pub fn SqlViewer(
    /// Preview text
    #[prop(into)]
    sql: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="sql-viewer-container">
            {move || {
                let sql_text = sql.get();
                if is_query(&sql_text) {
                    let highlighted = highlight_sql(&sql_text);
                    view! {
                        <div class="sql-content">
                            <button
                                class="btn btn-secondary btn-sm"
                                type="button"
                                on:click=move |_| copy_to_clipboard(sql_text.clone())
                            >
                                "📋 Copiar"
                            </button>
                            <div class="sql-query-section">
                                <div class="sql-query" inner_html=highlighted></div>
                            </div>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="sql-placeholder">
                            <p class="text-muted">{sql_text}</p>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

fn copy_to_clipboard(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("Failed to copy query: {:?}", e);
        }
    });
}

fn is_query(text: &str) -> bool {
    text.starts_with("SELECT ")
}

/// Highlight SQL keywords and string literals, one clause per line.
/// Quoted literals are shown exactly as written.
pub fn highlight_sql(sql: &str) -> String {
    let escaped = html_escape(sql);
    let segments: Vec<&str> = escaped.split('\'').collect();
    let last = segments.len() - 1;

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i % 2 == 1 {
                // an unmatched quote leaves the final literal open
                let close = if i < last { "'" } else { "" };
                format!("<span class=\"sql-string\">'{}{}</span>", segment, close)
            } else {
                highlight_keywords(&format_sql_structure(segment), i == 0)
            }
        })
        .collect()
}

fn highlight_keywords(sql: &str, at_start: bool) -> String {
    let mut result = sql.to_string();

    let keywords = [
        ("SELECT", "sql-keyword"),
        ("FROM", "sql-keyword"),
        ("WHERE", "sql-keyword"),
        ("GROUP BY", "sql-keyword"),
        ("ORDER BY", "sql-keyword"),
        ("AND", "sql-keyword"),
        ("AS", "sql-keyword"),
        ("as", "sql-keyword"),
        ("IN", "sql-keyword"),
        ("LIKE", "sql-keyword"),
        ("DESC", "sql-keyword"),
        ("SUM", "sql-function"),
        ("COUNT", "sql-function"),
        ("AVG", "sql-function"),
        ("MIN", "sql-function"),
        ("MAX", "sql-function"),
    ];

    for (keyword, class) in &keywords {
        let highlighted = format!("<span class=\"{}\">{}</span>", class, keyword);
        result = result.replace(&format!(" {} ", keyword), &format!(" {} ", highlighted));
        result = result.replace(&format!(" {}(", keyword), &format!(" {}(", highlighted));
        result = result.replace(&format!(" {}<br/>", keyword), &format!(" {}<br/>", highlighted));
        result = result.replace(
            &format!("<br/>{}", keyword),
            &format!("<br/>{}", highlighted),
        );
        result = result.replace(
            &format!("&nbsp;&nbsp;{}", keyword),
            &format!("&nbsp;&nbsp;{}", highlighted),
        );
        if result.ends_with(&format!(" {}", keyword)) {
            let cut = result.len() - keyword.len();
            result = format!("{}{}", &result[..cut], highlighted);
        }

        if at_start && result.starts_with(keyword) {
            result = format!("{}{}", highlighted, &result[keyword.len()..]);
        }
    }

    result
}

/// Line breaks and indentation for the clauses the preview produces
fn format_sql_structure(sql: &str) -> String {
    let mut result = sql.to_string();

    result = result.replace(" FROM ", "<br/>FROM<br/>&nbsp;&nbsp;");
    result = result.replace(" WHERE ", "<br/>WHERE<br/>&nbsp;&nbsp;");
    result = result.replace(" GROUP BY ", "<br/>GROUP BY<br/>&nbsp;&nbsp;");
    result = result.replace(" ORDER BY ", "<br/>ORDER BY<br/>&nbsp;&nbsp;");

    if let Some(rest) = result.strip_prefix("SELECT ") {
        result = format!("SELECT<br/>&nbsp;&nbsp;{}", rest);
    }

    result = result.replace(", ", ",<br/>&nbsp;&nbsp;");
    result = result.replace(" AND ", "<br/>&nbsp;&nbsp;AND ");

    result
}

/// Quotes are kept: literals are located by them afterwards
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_query() {
        assert!(is_query("SELECT * FROM sales WHERE 1=1"));
        assert!(!is_query("Adicione campos para ver a preview da query"));
    }

    #[test]
    fn test_structure_breaks_clauses() {
        let formatted = format_sql_structure(
            "SELECT SUM(a) as a, COUNT(b) as b FROM sales WHERE 1=1 AND date >= '2024-01-01' GROUP BY channel",
        );
        assert!(formatted.starts_with("SELECT<br/>&nbsp;&nbsp;SUM(a) as a,<br/>"));
        assert!(formatted.contains("<br/>FROM<br/>&nbsp;&nbsp;sales"));
        assert!(formatted.contains("<br/>&nbsp;&nbsp;AND date"));
        assert!(formatted.ends_with("<br/>GROUP BY<br/>&nbsp;&nbsp;channel"));
    }

    #[test]
    fn test_highlight_escapes_and_marks_literals() {
        let html = highlight_sql("SELECT * FROM sales WHERE 1=1 AND total <= '5'");
        assert!(html.starts_with("<span class=\"sql-keyword\">SELECT</span>"));
        assert!(html.contains("&lt;="));
        assert!(html.contains("<span class=\"sql-string\">'5'</span>"));
        assert!(!html.contains(" <= "));
    }

    #[test]
    fn test_highlight_functions_and_trailing_desc() {
        let html = highlight_sql(
            "SELECT SUM(total_sales) as total_sales FROM sales WHERE 1=1 ORDER BY total_sales DESC",
        );
        assert!(html.contains("<span class=\"sql-function\">SUM</span>(total_sales)"));
        assert!(html.ends_with("total_sales <span class=\"sql-keyword\">DESC</span>"));
    }

    #[test]
    fn test_highlight_keeps_literals_verbatim() {
        let html = highlight_sql(
            "SELECT * FROM sales WHERE 1=1 AND product_name LIKE 'rock AND roll, x' GROUP BY store",
        );
        assert!(html.contains("<span class=\"sql-string\">'rock AND roll, x'</span>"));
        assert!(html.contains("<span class=\"sql-keyword\">LIKE</span> <span class=\"sql-string\">"));
        assert!(html.ends_with("<br/><span class=\"sql-keyword\">GROUP BY</span><br/>&nbsp;&nbsp;store"));
    }

    #[test]
    fn test_highlight_unterminated_literal() {
        let html = highlight_sql("SELECT * FROM sales WHERE 1=1 AND store = 'Loja, 1");
        assert!(html.ends_with("<span class=\"sql-string\">'Loja, 1</span>"));
    }
}
