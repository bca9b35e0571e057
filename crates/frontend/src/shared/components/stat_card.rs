use crate::analytics::kpi::{KpiCard, Trend};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn StatCard(
    /// Card content; None while loading
    #[prop(into)]
    card: Signal<Option<KpiCard>>,
    /// Label shown while there is no data yet
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
) -> impl IntoView {
    let value = move || match card.get() {
        Some(card) => card.value,
        None => "—".to_string(),
    };

    let change_view = move || {
        card.get().map(|card| {
            let arrow = match card.change.trend {
                Trend::Up => "\u{2191}",
                Trend::Down => "\u{2193}",
                Trend::Flat => "",
            };
            let cls = card.change.css_class();
            view! { <span class=cls>{format!("{}{}", arrow, card.change.text)}</span> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {value}
                    {change_view}
                </div>
            </div>
        </div>
    }
}
