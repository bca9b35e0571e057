use super::field_palette::{DropZone, FieldPalette};
use super::filter_rows::FilterRows;
use crate::analytics::chart_bridge::render_or_log;
use crate::analytics::chart_data::result_charts;
use crate::analytics::query_builder::{
    Area, QueryBuilder, DIMENSION_CATALOG, MEASURE_CATALOG, NOTHING_SELECTED_ERROR,
};
use crate::analytics::result_simulator::simulate_result_set;
use crate::app::Services;
use crate::shared::components::result_table::ResultTable;
use crate::shared::components::sql_viewer::SqlViewer;
use crate::shared::date_utils::{default_query_range, format_datetime, today};
use crate::shared::export::{export_filename, export_results};
use crate::shared::request_guard::RequestGuard;
use chrono::Utc;
use contracts::shared::analytics::{ResultSet, SavedQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Advanced mode: build a query from fields, preview it and run it against
/// the dashboard snapshot of the selected range
#[component]
pub fn QueryBuilderDashboard(services: Services) -> impl IntoView {
    let builder = RwSignal::new({
        let range = default_query_range();
        let mut b = QueryBuilder::new();
        b.set_date_range(Some(&range.start_str()), Some(&range.end_str()));
        b
    });
    let preview = Signal::derive(move || builder.with(|b| b.render_preview()));

    let (results, set_results) = signal(None::<ResultSet>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (message, set_message) = signal(None::<String>);
    let (execution_time, set_execution_time) = signal(None::<f64>);
    let (show_charts, set_show_charts) = signal(true);

    let (saved, set_saved) = signal(services.with_value(|s| s.saved_queries.list()));
    let (save_name, set_save_name) = signal(String::new());

    let guard = RequestGuard::new();

    let on_execute = {
        let guard = guard.clone();
        move |_| {
            let b = builder.get_untracked();
            if !b.can_execute() {
                set_error.set(Some(NOTHING_SELECTED_ERROR.to_string()));
                return;
            }
            let ticket = guard.begin();
            let client = services.with_value(|s| s.client.clone());
            set_loading.set(true);
            set_error.set(None);
            let started = js_sys::Date::now();

            spawn_local(async move {
                let result = client.get_dashboard_data(b.start_date(), b.end_date()).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(snapshot) => {
                        let set = simulate_result_set(&snapshot, b.query());
                        log::debug!("query returned {} rows", set.len());
                        set_results.set(Some(set));
                        set_execution_time.set(Some((js_sys::Date::now() - started) / 1000.0));
                    }
                    Err(e) => {
                        log::error!("Error executing query: {}", e);
                        set_error.set(Some(format!("Erro ao executar query: {}", e)));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    let on_clear = move |_| {
        guard.invalidate();
        builder.update(|b| b.clear());
        set_results.set(None);
        set_execution_time.set(None);
        set_loading.set(false);
        set_error.set(None);
    };

    let on_save = move |_| {
        let name = save_name.get_untracked();
        let query = builder.with_untracked(|b| b.query().clone());
        let timestamp = Utc::now().to_rfc3339();
        let outcome = services.with_value(|s| {
            s.saved_queries
                .append(&name, &query, &timestamp)
                .map(|_| s.saved_queries.list())
        });
        match outcome {
            Ok(list) => {
                set_saved.set(list);
                set_save_name.set(String::new());
                set_message.set(Some(format!("✅ Query \"{}\" salva com sucesso!", name.trim())));
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    let on_export = move |_| {
        let filename = export_filename(&today().format("%Y-%m-%d").to_string());
        let outcome = results.with_untracked(|r| match r {
            Some(set) => export_results(set, &filename),
            None => Err("Não há resultados para exportar".to_string()),
        });
        if let Err(e) = outcome {
            set_error.set(Some(e));
        }
    };

    let on_test_endpoint = move |_| {
        let client = services.with_value(|s| s.client.clone());
        spawn_local(async move {
            let text = if client.health_check().await {
                "✅ Endpoint da API está funcionando corretamente!"
            } else {
                "❌ Erro ao conectar com a API. Verifique se o backend está rodando."
            };
            set_message.set(Some(text.to_string()));
        });
    };

    let charts = Memo::new(move |_| {
        results
            .get()
            .map(|set| result_charts(&set))
            .unwrap_or_default()
    });

    Effect::new(move |_| {
        if !show_charts.get() {
            return;
        }
        for (i, chart) in charts.get().iter().enumerate() {
            render_or_log(&format!("advancedChart{}", i), Some(chart));
        }
    });

    let set_dates = move |start: Option<String>, end: Option<String>| {
        builder.update(|b| {
            let start = start.or_else(|| b.start_date().map(str::to_string));
            let end = end.or_else(|| b.end_date().map(str::to_string));
            b.set_date_range(start.as_deref(), end.as_deref());
        });
    };

    view! {
        <div class="dashboard query-builder">
            {move || error.get().map(|e| view! {
                <div class="error-banner" on:click=move |_| set_error.set(None)>{e}</div>
            })}
            {move || message.get().map(|m| view! {
                <div class="info-banner" on:click=move |_| set_message.set(None)>{m}</div>
            })}

            <div class="builder-layout">
                <aside class="fields-sidebar">
                    <FieldPalette title="Dimensões" fields=DIMENSION_CATALOG builder=builder />
                    <FieldPalette title="Medidas" fields=MEASURE_CATALOG builder=builder />
                </aside>

                <section class="builder-main">
                    <div class="date-filters">
                        <label>"De: "
                            <input
                                type="date"
                                id="start-date"
                                prop:value=move || builder.with(|b| b.start_date().unwrap_or_default().to_string())
                                on:change=move |ev| set_dates(Some(event_target_value(&ev)), None)
                            />
                        </label>
                        <label>"Até: "
                            <input
                                type="date"
                                id="end-date"
                                prop:value=move || builder.with(|b| b.end_date().unwrap_or_default().to_string())
                                on:change=move |ev| set_dates(None, Some(event_target_value(&ev)))
                            />
                        </label>
                    </div>

                    <h4>"Dimensões"</h4>
                    <DropZone area=Area::Dimensions builder=builder />
                    <h4>"Medidas"</h4>
                    <DropZone area=Area::Measures builder=builder />
                    <h4>"Filtros"</h4>
                    <FilterRows builder=builder />

                    <h4>"Preview da Query"</h4>
                    <SqlViewer sql=preview />

                    <div class="builder-actions">
                        <button class="btn btn-primary" on:click=on_execute disabled=move || loading.get()>
                            "▶ Executar Query"
                        </button>
                        <button class="btn btn-secondary" on:click=on_clear>"🗑 Limpar"</button>
                        <button class="btn btn-secondary" on:click=on_export>"⬇ Exportar CSV"</button>
                        <button class="btn btn-secondary" on:click=on_test_endpoint>"🔌 Testar Endpoint"</button>
                    </div>

                    <div class="save-query">
                        <input
                            type="text"
                            placeholder="Nome da query..."
                            prop:value=move || save_name.get()
                            on:input=move |ev| set_save_name.set(event_target_value(&ev))
                        />
                        <button class="btn btn-secondary" on:click=on_save>"💾 Salvar Query"</button>
                    </div>
                    <SavedQueryList saved=saved builder=builder />
                </section>
            </div>

            <section class="results-section">
                <div class="execution-info">
                    <span id="result-count">
                        {move || format!("{} registros", results.with(|r| r.as_ref().map_or(0, |s| s.len())))}
                    </span>
                    <span id="execution-time">
                        {move || execution_time.get().map_or("-".to_string(), |t| format!("{:.2}s", t))}
                    </span>
                    {move || loading.get().then(|| view! { <span class="loading">"Executando..."</span> })}
                </div>
                <ResultTable results=results />
            </section>

            <section class="charts-section">
                <button class="btn btn-secondary btn-sm" on:click=move |_| set_show_charts.update(|v| *v = !*v)>
                    {move || if show_charts.get() { "📊 Ocultar Gráficos" } else { "📈 Mostrar Gráficos" }}
                </button>
                <Show when=move || show_charts.get()>
                    <div id="charts-grid" class="charts-grid">
                        {move || {
                            let specs = charts.get();
                            if specs.is_empty() {
                                return view! {
                                    <div class="chart-placeholder">
                                        <p>"Execute uma query para ver as visualizações"</p>
                                    </div>
                                }
                                    .into_any();
                            }
                            specs
                                .into_iter()
                                .enumerate()
                                .map(|(i, spec)| view! {
                                    <div class="chart-container-advanced">
                                        <h4>{spec.title}</h4>
                                        <div id=format!("advancedChart{}", i)></div>
                                    </div>
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn SavedQueryList(saved: ReadSignal<Vec<SavedQuery>>, builder: RwSignal<QueryBuilder>) -> impl IntoView {
    view! {
        <div class="saved-queries">
            {move || {
                saved
                    .get()
                    .into_iter()
                    .map(|entry| {
                        let label = format!("{} ({})", entry.name, format_datetime(&entry.timestamp));
                        let query = entry.query;
                        view! {
                            <button
                                class="saved-query"
                                type="button"
                                on:click=move |_| builder.update(|b| b.load(query.clone()))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
