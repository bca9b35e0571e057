use crate::analytics::query_builder::{Area, CatalogField, QueryBuilder};
use crate::shared::icons::icon;
use contracts::shared::analytics::{FieldKind, FieldRef};
use leptos::prelude::*;
use web_sys::DragEvent;

const DRAG_MIME: &str = "application/json";

fn area_for(field_ref: &FieldRef) -> Option<Area> {
    match field_ref.kind {
        FieldKind::Dimension => Some(Area::Dimensions),
        FieldKind::Measure => Some(Area::Measures),
        FieldKind::Filter => None,
    }
}

/// Draggable list of catalog fields. Clicking an item adds it too.
#[component]
pub fn FieldPalette(
    title: &'static str,
    fields: &'static [CatalogField],
    builder: RwSignal<QueryBuilder>,
) -> impl IntoView {
    let items = fields
        .iter()
        .map(|entry| {
            let field_ref = entry.to_field_ref();
            let kind_icon = if entry.aggregation.is_some() { "measure" } else { "dimension" };
            let payload = serde_json::to_string(&field_ref).unwrap_or_default();
            let on_click = {
                let field_ref = field_ref.clone();
                move |_| {
                    if let Some(area) = area_for(&field_ref) {
                        builder.update(|b| {
                            b.add_field(field_ref.clone(), area);
                        });
                    }
                }
            };

            view! {
                <div
                    class="field-item"
                    draggable="true"
                    title=field_ref.display_text()
                    on:dragstart=move |ev: DragEvent| {
                        if let Some(dt) = ev.data_transfer() {
                            if let Err(e) = dt.set_data(DRAG_MIME, &payload) {
                                log::error!("Error setting drag data: {:?}", e);
                            }
                        }
                    }
                    on:click=on_click
                >
                    {icon(kind_icon)}
                    <span>{entry.label}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="field-palette">
            <h4>{title}</h4>
            {items}
        </div>
    }
}

/// Drop target for one area, listing its fields as removable chips
#[component]
pub fn DropZone(area: Area, builder: RwSignal<QueryBuilder>) -> impl IntoView {
    let (drag_over, set_drag_over) = signal(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        let Some(raw) = ev.data_transfer().and_then(|dt| dt.get_data(DRAG_MIME).ok()) else {
            return;
        };
        match serde_json::from_str::<FieldRef>(&raw) {
            Ok(field_ref) if area_for(&field_ref) == Some(area) => {
                builder.update(|b| {
                    b.add_field(field_ref, area);
                });
            }
            Ok(field_ref) => {
                log::debug!("'{}' cannot be dropped on {}", field_ref.field, area.as_str());
            }
            Err(e) => log::error!("Error parsing dropped data: {}", e),
        }
    };

    let zone_class = move || {
        let mut class = String::from("drop-zone");
        if builder.with(|b| b.is_area_empty(area)) {
            class.push_str(" empty");
        }
        if drag_over.get() {
            class.push_str(" drag-over");
        }
        class
    };

    view! {
        <div
            id=format!("{}-area", area.as_str())
            class=zone_class
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_drag_over.set(true);
            }
            on:dragleave=move |_| set_drag_over.set(false)
            on:drop=on_drop
        >
            {move || {
                let fields = builder.with(|b| b.fields(area).to_vec());
                if fields.is_empty() {
                    return area.empty_text().into_any();
                }
                fields
                    .into_iter()
                    .map(|f| {
                        let name = f.field.clone();
                        view! {
                            <div class="field-in-area">
                                <span>{f.display_text()}</span>
                                <button
                                    class="remove-field"
                                    type="button"
                                    on:click=move |_| {
                                        builder.update(|b| {
                                            b.remove_field(area, &name);
                                        });
                                    }
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
