use contracts::shared::analytics::ResultSet;
use leptos::prelude::*;

use crate::shared::components::table::{format_cell, format_column_name};

/// Result grid of the advanced mode.
///
/// `None` means no query ran yet; an empty set means the query matched nothing.
#[component]
pub fn ResultTable(#[prop(into)] results: Signal<Option<ResultSet>>) -> impl IntoView {
    view! {
        <div class="table-container">
            <table class="results-table">
                {move || match results.get() {
                    None => view! {
                        <thead>
                            <tr><th>"Selecione dimensões e medidas para ver resultados"</th></tr>
                        </thead>
                        <tbody>
                            <tr>
                                <td class="table-empty">
                                    "🚀 Arraste campos das dimensões e medidas para construir sua query personalizada"
                                </td>
                            </tr>
                        </tbody>
                    }
                        .into_any(),
                    Some(set) if set.is_empty() => view! {
                        <tbody>
                            <tr>
                                <td class="table-empty">
                                    "Nenhum resultado encontrado para a query atual"
                                </td>
                            </tr>
                        </tbody>
                    }
                        .into_any(),
                    Some(set) => {
                        let header = set
                            .columns
                            .iter()
                            .map(|c| view! { <th>{format_column_name(c)}</th> })
                            .collect_view();
                        let body = set
                            .rows
                            .iter()
                            .map(|row| {
                                let cells = set
                                    .columns
                                    .iter()
                                    .map(|column| {
                                        let text = row
                                            .get(column)
                                            .map(|value| format_cell(column, value))
                                            .unwrap_or_default();
                                        view! { <td>{text}</td> }
                                    })
                                    .collect_view();
                                view! { <tr>{cells}</tr> }
                            })
                            .collect_view();
                        view! {
                            <thead><tr>{header}</tr></thead>
                            <tbody>{body}</tbody>
                        }
                            .into_any()
                    }
                }}
            </table>
        </div>
    }
}
