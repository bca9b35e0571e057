use crate::app::Services;
use crate::shared::components::table::{format_currency, format_number, format_number_int};
use crate::shared::date_utils::{format_date, DateRange};
use crate::shared::request_guard::RequestGuard;
use contracts::shared::analytics::{ChannelPerformance, SalesTrend, TopProduct};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Analysis {
    Products,
    Temporal,
    Channels,
}

impl Analysis {
    fn title(&self) -> &'static str {
        match self {
            Analysis::Products => "Análise de Produtos",
            Analysis::Temporal => "Análise Temporal de Vendas",
            Analysis::Channels => "Análise de Canais de Venda",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AnalysisData {
    Products(Vec<TopProduct>),
    Trends(Vec<SalesTrend>),
    Channels(Vec<ChannelPerformance>),
}

/// Detail tables backed by the list endpoints. These fail soft: an
/// unreachable endpoint shows an empty table.
#[component]
pub fn AnalysisPanel(services: Services, #[prop(into)] range: Signal<DateRange>) -> impl IntoView {
    let (selected, set_selected) = signal(None::<Analysis>);
    let (result, set_result) = signal(None::<AnalysisData>);
    let (loading, set_loading) = signal(false);
    let guard = RequestGuard::new();

    Effect::new(move |_| {
        let Some(analysis) = selected.get() else {
            return;
        };
        let range = range.get();
        let ticket = guard.begin();
        let (client, limit) =
            services.with_value(|s| (s.client.clone(), s.config.top_products_limit));
        set_loading.set(true);

        spawn_local(async move {
            let start = range.start_str();
            let end = range.end_str();
            let data = match analysis {
                Analysis::Products => AnalysisData::Products(
                    client.get_top_products(limit, Some(&start), Some(&end)).await,
                ),
                Analysis::Temporal => AnalysisData::Trends(
                    client.get_sales_trends("day", Some(&start), Some(&end)).await,
                ),
                Analysis::Channels => AnalysisData::Channels(
                    client.get_channel_performance(Some(&start), Some(&end)).await,
                ),
            };
            if ticket.is_current() {
                set_result.set(Some(data));
                set_loading.set(false);
            }
        });
    });

    let tab = move |analysis: Analysis, label: &'static str| {
        view! {
            <button
                class=move || if selected.get() == Some(analysis) { "analysis-card active" } else { "analysis-card" }
                on:click=move |_| set_selected.set(Some(analysis))
            >
                {label}
            </button>
        }
    };

    view! {
        <section class="analysis-panel">
            <div class="analysis-cards">
                {tab(Analysis::Products, "📦 Produtos")}
                {tab(Analysis::Temporal, "📅 Temporal")}
                {tab(Analysis::Channels, "🛵 Canais")}
            </div>
            {move || selected.get().map(|a| view! { <h3 class="result-title">{a.title()}</h3> })}
            {move || loading.get().then(|| view! { <p class="text-muted">"Carregando análise..."</p> })}
            {move || result.get().map(render_analysis)}
        </section>
    }
}

fn render_analysis(data: AnalysisData) -> AnyView {
    match data {
        AnalysisData::Products(products) => analysis_table(
            &["Produto", "Quantidade", "Faturamento"],
            products
                .iter()
                .map(|p| {
                    vec![
                        p.product_name.clone(),
                        format_number(p.quantity_sold),
                        format_currency(p.revenue),
                    ]
                })
                .collect(),
        ),
        AnalysisData::Trends(trends) => analysis_table(
            &["Data", "Pedidos", "Faturamento", "Ticket Médio"],
            trends
                .iter()
                .map(|t| {
                    vec![
                        format_date(&t.date),
                        format_number_int(t.orders as f64),
                        format_currency(t.revenue),
                        format_currency(t.avg_ticket),
                    ]
                })
                .collect(),
        ),
        AnalysisData::Channels(channels) => analysis_table(
            &["Canal", "Pedidos", "Faturamento", "Ticket Médio"],
            channels
                .iter()
                .map(|c| {
                    vec![
                        c.channel_name.clone(),
                        format_number_int(c.orders as f64),
                        format_currency(c.revenue),
                        format_currency(c.avg_ticket),
                    ]
                })
                .collect(),
        ),
    }
}

fn analysis_table(headers: &[&'static str], rows: Vec<Vec<String>>) -> AnyView {
    if rows.is_empty() {
        return view! { <p class="text-muted">"Sem dados para o período selecionado"</p> }.into_any();
    }
    let header = headers
        .iter()
        .map(|h| view! { <th>{*h}</th> })
        .collect_view();
    let body = rows
        .into_iter()
        .map(|cells| {
            let cells = cells
                .into_iter()
                .map(|c| view! { <td>{c}</td> })
                .collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();
    view! {
        <table class="results-table">
            <thead><tr>{header}</tr></thead>
            <tbody>{body}</tbody>
        </table>
    }
    .into_any()
}
