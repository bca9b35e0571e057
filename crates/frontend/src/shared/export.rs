/// CSV export of query results
use contracts::shared::analytics::{CellValue, ResultSet};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::components::table::format_column_name;

/// Build CSV text: header row of column labels, then raw values
pub fn results_to_csv(results: &ResultSet) -> String {
    let mut csv_content = String::new();

    // UTF-8 BOM so spreadsheet apps detect the encoding of accented labels
    csv_content.push('\u{FEFF}');

    let headers: Vec<String> = results
        .columns
        .iter()
        .map(|c| escape_csv_cell(&format_column_name(c)))
        .collect();
    csv_content.push_str(&headers.join(","));
    csv_content.push('\n');

    for row in &results.rows {
        let cells: Vec<String> = results
            .columns
            .iter()
            .map(|column| match row.get(column) {
                Some(CellValue::Number(n)) => n.to_string(),
                Some(CellValue::Text(s)) => escape_csv_cell(s),
                None => String::new(),
            })
            .collect();
        csv_content.push_str(&cells.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// File name for a download made on `date` (YYYY-MM-DD)
pub fn export_filename(date: &str) -> String {
    format!("query_results_{}.csv", date)
}

/// Exports results as CSV and triggers a browser download
pub fn export_results(results: &ResultSet, filename: &str) -> Result<(), String> {
    if results.is_empty() {
        return Err("Não há resultados para exportar".to_string());
    }

    let blob = create_csv_blob(&results_to_csv(results))?;
    download_blob(&blob, filename)
}

/// Quote a cell if it contains the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
