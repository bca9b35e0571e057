use crate::analytics::query_builder::{QueryBuilder, FILTER_FIELDS};
use contracts::shared::analytics::FilterOperator;
use leptos::prelude::*;

/// Editable filter rows. Incomplete rows stay visible but do not filter.
#[component]
pub fn FilterRows(builder: RwSignal<QueryBuilder>) -> impl IntoView {
    let row_count = move || builder.with(|b| b.filter_rows().len());

    view! {
        <div id="filters-area" class="filters-area">
            <For
                each=move || 0..row_count()
                key=|index| *index
                children=move |index| view! { <FilterRowEditor index=index builder=builder /> }
            />
            <div class="filter-actions">
                <button
                    class="btn btn-secondary btn-sm"
                    type="button"
                    on:click=move |_| {
                        builder.update(|b| {
                            b.add_filter_row();
                        });
                    }
                >
                    "+ Adicionar Filtro"
                </button>
            </div>
        </div>
    }
}

#[component]
fn FilterRowEditor(index: usize, builder: RwSignal<QueryBuilder>) -> impl IntoView {
    let row = move || builder.with(|b| b.filter_rows().get(index).cloned().unwrap_or_default());

    let update = move |field: Option<String>, operator: Option<FilterOperator>, value: Option<String>| {
        builder.update(|b| {
            let Some(current) = b.filter_rows().get(index).cloned() else {
                return;
            };
            b.set_filter(
                index,
                field.as_deref().unwrap_or(&current.field),
                operator.unwrap_or(current.operator),
                value.as_deref().unwrap_or(&current.value),
            );
        });
    };

    view! {
        <div class="filter-row">
            <select
                class="filter-select filter-field"
                prop:value=move || row().field
                on:change=move |ev| update(Some(event_target_value(&ev)), None, None)
            >
                <option value="">"Selecione um campo"</option>
                {FILTER_FIELDS
                    .iter()
                    .map(|(field, label)| view! { <option value=*field>{*label}</option> })
                    .collect_view()}
            </select>
            <select
                class="filter-select filter-operator"
                prop:value=move || row().operator.symbol()
                on:change=move |ev| {
                    if let Some(op) = FilterOperator::from_symbol(&event_target_value(&ev)) {
                        update(None, Some(op), None);
                    }
                }
            >
                {FilterOperator::all()
                    .iter()
                    .map(|op| view! { <option value=op.symbol()>{op.symbol()}</option> })
                    .collect_view()}
            </select>
            <input
                type="text"
                class="filter-input filter-value"
                placeholder="Valor..."
                prop:value=move || row().value
                on:change=move |ev| update(None, None, Some(event_target_value(&ev)))
            />
            <button
                class="remove-filter"
                type="button"
                on:click=move |_| {
                    builder.update(|b| {
                        b.remove_filter_row(index);
                    });
                }
            >
                "✕"
            </button>
        </div>
    }
}
