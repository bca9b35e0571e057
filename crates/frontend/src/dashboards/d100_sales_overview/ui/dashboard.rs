use super::analysis::AnalysisPanel;
use crate::analytics::chart_bridge::render_or_log;
use crate::analytics::chart_data;
use crate::analytics::kpi::{kpi_cards, DerivedMetrics};
use crate::app::Services;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::{format_datetime, today, Period};
use crate::shared::request_guard::RequestGuard;
use chrono::Utc;
use contracts::shared::analytics::DashboardSnapshot;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Sales overview: KPI cards, charts and per-day metrics for a period
#[component]
pub fn SalesOverviewDashboard(services: Services) -> impl IntoView {
    let default_period = services.with_value(|s| s.config.default_period());
    let (period, set_period) = signal(default_period);
    let (reload, set_reload) = signal(0u32);

    let (data, set_data) = signal(None::<DashboardSnapshot>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (last_update, set_last_update) = signal(None::<String>);

    let guard = RequestGuard::new();
    let range = Memo::new(move |_| period.get().resolve(today()));

    // Load data when the period changes or a refresh is requested
    Effect::new(move |_| {
        let range = range.get();
        reload.track();

        let ticket = guard.begin();
        let client = services.with_value(|s| s.client.clone());
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = client
                .get_dashboard_data(Some(&range.start_str()), Some(&range.end_str()))
                .await;
            if !ticket.is_current() {
                log::debug!("discarding superseded dashboard response");
                return;
            }
            match result {
                Ok(snapshot) => {
                    set_data.set(Some(snapshot));
                    set_last_update.set(Some(format_datetime(&Utc::now().to_rfc3339())));
                }
                Err(e) => {
                    set_error.set(Some(format!("Erro ao carregar dados do dashboard: {}", e)));
                }
            }
            set_loading.set(false);
        });
    });

    // Push chart specs to the page renderer whenever data changes
    Effect::new(move |_| {
        let Some(snapshot) = data.get() else {
            return;
        };
        render_or_log(
            "revenueTrendChart",
            chart_data::revenue_trend(&snapshot.sales_trends).as_ref(),
        );
        render_or_log(
            "topProductsChart",
            chart_data::top_products(&snapshot.top_products).as_ref(),
        );
        render_or_log(
            "channelChart",
            chart_data::channel_mix(&snapshot.channel_performance).as_ref(),
        );
        render_or_log(
            "hourlySalesChart",
            chart_data::hourly_pattern(&snapshot.hourly_sales).as_ref(),
        );
    });

    let cards = Memo::new(move |_| data.get().map(|d| kpi_cards(&d.overview)));
    let card = move |index: usize| {
        Signal::derive(move || cards.get().and_then(|c| c.get(index).cloned()))
    };

    let metrics = Memo::new(move |_| {
        data.get()
            .map(|d| DerivedMetrics::compute(&d.overview, range.get().days()))
    });

    let on_refresh = move |_| {
        services.with_value(|s| s.client.clear_cache());
        set_reload.update(|n| *n += 1);
    };

    view! {
        <div class="dashboard sales-overview">
            <div class="dashboard-toolbar">
                <label>
                    "Período: "
                    <select
                        prop:value=move || period.get().as_str()
                        on:change=move |ev| set_period.set(Period::from_value(&event_target_value(&ev)))
                    >
                        {Period::all()
                            .iter()
                            .map(|p| view! { <option value=p.as_str()>{p.display_name()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <button class="btn btn-primary" on:click=on_refresh disabled=move || loading.get()>
                    "🔄 Atualizar"
                </button>
                <span class="last-update">
                    {move || last_update.get().map(|t| format!("Última atualização: {}", t))}
                </span>
            </div>

            {move || error.get().map(|e| view! { <div class="error-banner">{e}</div> })}
            {move || loading.get().then(|| view! { <div class="loading-overlay show">"Carregando..."</div> })}

            <div class="kpi-grid">
                <StatCard card=card(0) label="Faturamento Total" icon_name="revenue" />
                <StatCard card=card(1) label="Total de Pedidos" icon_name="orders" />
                <StatCard card=card(2) label="Ticket Médio" icon_name="ticket" />
                <StatCard card=card(3) label="Clientes Únicos" icon_name="customers" />
            </div>

            <div class="charts-grid">
                <div class="chart-card"><h3>"Tendência de Faturamento"</h3><div id="revenueTrendChart"></div></div>
                <div class="chart-card"><h3>"Produtos Mais Vendidos"</h3><div id="topProductsChart"></div></div>
                <div class="chart-card"><h3>"Vendas por Canal"</h3><div id="channelChart"></div></div>
                <div class="chart-card"><h3>"Vendas por Hora"</h3><div id="hourlySalesChart"></div></div>
            </div>

            <div class="metrics-panel">
                <h3>{move || format!("Métricas dos {}", period.get().display_name())}</h3>
                {move || {
                    metrics
                        .get()
                        .map(|m| {
                            m.rows()
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <div class="metric-row">
                                            <span class="metric-label">{label}</span>
                                            <span class="metric-value">{value}</span>
                                        </div>
                                    }
                                })
                                .collect_view()
                        })
                }}
            </div>

            <AnalysisPanel services=services range=range />
        </div>
    }
}
