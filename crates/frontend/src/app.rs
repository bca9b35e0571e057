use crate::analytics::AnalyticsClient;
use crate::dashboards::{QueryBuilderDashboard, SalesOverviewDashboard};
use crate::shared::config::ClientConfig;
use crate::shared::saved_queries::SavedQueryStore;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// Everything the pages need, built once at startup
pub struct AppServices {
    pub config: ClientConfig,
    pub client: Rc<AnalyticsClient>,
    pub saved_queries: SavedQueryStore,
}

impl AppServices {
    pub fn new(config: ClientConfig) -> Self {
        let client = Rc::new(AnalyticsClient::new(&config));
        Self {
            config,
            client,
            saved_queries: SavedQueryStore::new(),
        }
    }
}

/// Handle passed to pages as a prop
pub type Services = StoredValue<AppServices, LocalStorage>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Simple,
    Advanced,
}

#[component]
pub fn App() -> impl IntoView {
    let services: Services = StoredValue::new_local(AppServices::new(ClientConfig::default()));
    let (mode, set_mode) = signal(Mode::Simple);
    let (healthy, set_healthy) = signal(None::<bool>);

    Effect::new(move |_| {
        let client = services.with_value(|s| s.client.clone());
        spawn_local(async move {
            set_healthy.set(Some(client.health_check().await));
        });
    });

    let status = move || match healthy.get() {
        None => ("status-indicator", "Verificando conexão..."),
        Some(true) => ("status-indicator healthy", "Sistema Online - Dados em Tempo Real"),
        Some(false) => ("status-indicator error", "Sistema Offline - Verifique o Backend"),
    };

    let tab_class = move |m: Mode| {
        if mode.get() == m {
            "mode-tab active"
        } else {
            "mode-tab"
        }
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Restaurant Analytics"</h1>
                <div class="status">
                    <span class=move || status().0></span>
                    <span class="status-text">{move || status().1}</span>
                </div>
                <nav class="mode-tabs">
                    <button class=move || tab_class(Mode::Simple) on:click=move |_| set_mode.set(Mode::Simple)>
                        "Modo Simples"
                    </button>
                    <button class=move || tab_class(Mode::Advanced) on:click=move |_| set_mode.set(Mode::Advanced)>
                        "Modo Avançado"
                    </button>
                </nav>
            </header>
            <main>
                {move || match mode.get() {
                    Mode::Simple => view! { <SalesOverviewDashboard services=services /> }.into_any(),
                    Mode::Advanced => view! { <QueryBuilderDashboard services=services /> }.into_any(),
                }}
            </main>
        </div>
    }
}
