use leptos::prelude::*;
use tracing::{info, warn};

use crate::host::{self, ComponentHost, RelayNote};
use crate::recipe_core::{FieldEdit, IngredientRow, RecipeForm};
use crate::session::RecipeSession;

const LABEL_STYLE: &str = "font-weight: 600; font-size: 0.9em;";
const INPUT_STYLE: &str = "padding: 0.5rem; border-radius: 4px; border: 1px solid var(--border-color); background: var(--bg-secondary); color: var(--text-primary); width: 100%; box-sizing: border-box;";
const TEXTAREA_STYLE: &str = "padding: 0.75rem; border-radius: 4px; border: 1px solid var(--border-color); background: var(--bg-secondary); color: var(--text-primary); width: 100%; min-height: 8rem; box-sizing: border-box; font-family: inherit; resize: vertical;";

#[component]
pub fn App() -> impl IntoView {
    let session = StoredValue::new_local(RecipeSession::new(ComponentHost::default()));
    let (form, set_form) = signal(RecipeForm::default());

    let dispatch = move |edit: FieldEdit| {
        session.update_value(|s| {
            if s.dispatch(edit).is_some() {
                set_form.set(s.form().clone());
            }
        });
    };

    let on_note = move |note: RelayNote| {
        let raw = note.content_json().unwrap_or_else(|err| {
            warn!(error = %err, "could not read note content");
            None
        });
        session.update_value(|s| {
            s.host_mut().attach(note);
            s.on_note_received(raw.as_ref());
            set_form.set(s.form().clone());
        });
    };
    match host::register(on_note) {
        Ok(relay) => {
            session.update_value(|s| s.host_mut().set_relay(relay));
        }
        Err(err) => {
            warn!(error = %err, "editing without a host, changes will not be saved");
        }
    }
    info!(
        connected = session.with_value(|s| s.host().is_connected()),
        "recipe editor mounted"
    );

    let ingredient_row = move |row: IngredientRow| {
        let id = row.id;
        let field = move |pick: fn(&IngredientRow) -> String| {
            move || form.with(|f| f.row(id).map(pick).unwrap_or_default())
        };

        view! {
            <tr>
                <td>
                    <input style=INPUT_STYLE type="text" class="ingredient-name" placeholder="e.g., Flour"
                        prop:value=field(|r| r.name.clone())
                        on:input=move |e| dispatch(FieldEdit::IngredientName { row: id, value: event_target_value(&e) })
                    />
                </td>
                <td>
                    <input style=INPUT_STYLE type="text" inputmode="decimal" class="ingredient-quantity" placeholder="e.g., 200"
                        prop:value=field(|r| r.displayed_quantity.clone())
                        on:input=move |e| dispatch(FieldEdit::IngredientQuantity { row: id, value: event_target_value(&e) })
                    />
                </td>
                <td>
                    <input style=INPUT_STYLE type="text" class="ingredient-unit" placeholder="e.g., grams"
                        prop:value=field(|r| r.unit.clone())
                        on:input=move |e| dispatch(FieldEdit::IngredientUnit { row: id, value: event_target_value(&e) })
                    />
                </td>
                <td>
                    <button
                        class="delete-btn"
                        style="background: transparent; border: none; font-size: 1.2rem; cursor: pointer; color: var(--text-muted);"
                        title="Remove ingredient"
                        on:click=move |_| dispatch(FieldEdit::RemoveIngredient(id))
                    >
                        "×"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <main class="recipe-layout" style="display: flex; flex-direction: column; gap: 1.5rem; padding: 2rem 3rem; background: var(--bg-primary); color: var(--text-primary); box-sizing: border-box;">
            <div style="display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1.5rem;">
                <div style="display: flex; flex-direction: column; gap: 0.5rem;">
                    <label style=LABEL_STYLE for="duration">"Duration"</label>
                    <input style=INPUT_STYLE id="duration" type="text" placeholder="e.g., 30 min"
                        prop:value=move || form.with(|f| f.duration.clone())
                        on:input=move |e| dispatch(FieldEdit::Duration(event_target_value(&e)))
                    />
                </div>
                <div style="display: flex; flex-direction: column; gap: 0.5rem;">
                    <label style=LABEL_STYLE for="scale">"Scale"</label>
                    <input style=INPUT_STYLE id="scale" type="number" step="0.1" min="0"
                        prop:value=move || form.with(|f| f.scale.clone())
                        on:input=move |e| dispatch(FieldEdit::Scale(event_target_value(&e)))
                    />
                </div>
                <div style="display: flex; flex-direction: column; gap: 0.5rem;">
                    <label style=LABEL_STYLE for="scale-reference">"Scale 1 means"</label>
                    <input style=INPUT_STYLE id="scale-reference" type="text" placeholder="e.g., 4 servings"
                        prop:value=move || form.with(|f| f.scale_reference.clone())
                        on:input=move |e| dispatch(FieldEdit::ScaleReference(event_target_value(&e)))
                    />
                </div>
            </div>

            <section>
                <h3 style="margin: 0 0 0.75rem; border-bottom: 1px solid var(--border-color); padding-bottom: 0.5rem;">
                    "Ingredients "
                    <span id="scale-reference-text" style="font-weight: 400; color: var(--text-muted);">
                        "(" {move || form.with(|f| f.scale_reference_label().to_string())} ")"
                    </span>
                </h3>
                <table style="width: 100%; border-collapse: collapse;">
                    <thead>
                        <tr style="text-align: left;">
                            <th>"Name"</th>
                            <th>"Quantity"</th>
                            <th>"Unit"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody id="ingredients-tbody">
                        <For
                            each=move || form.with(|f| f.ingredients.clone())
                            key=|row: &IngredientRow| row.id
                            children=ingredient_row
                        />
                    </tbody>
                </table>
                <button
                    id="add-ingredient-btn"
                    style="margin-top: 0.75rem; padding: 0.4rem 0.9rem; border-radius: 4px; border: 1px solid var(--border-color); background: var(--accent-color); color: white; cursor: pointer;"
                    on:click=move |_| dispatch(FieldEdit::AddIngredient)
                >
                    "+ Add ingredient"
                </button>
            </section>

            <section style="display: flex; flex-direction: column; gap: 0.5rem;">
                <label style=LABEL_STYLE for="main-recipe">"Recipe"</label>
                <textarea style=TEXTAREA_STYLE id="main-recipe"
                    prop:value=move || form.with(|f| f.main_recipe.clone())
                    on:input=move |e| dispatch(FieldEdit::MainRecipe(event_target_value(&e)))
                ></textarea>
            </section>
            <section style="display: flex; flex-direction: column; gap: 0.5rem;">
                <label style=LABEL_STYLE for="for-next-time">"For next time"</label>
                <textarea style=TEXTAREA_STYLE id="for-next-time"
                    prop:value=move || form.with(|f| f.for_next_time.clone())
                    on:input=move |e| dispatch(FieldEdit::ForNextTime(event_target_value(&e)))
                ></textarea>
            </section>
            <section style="display: flex; flex-direction: column; gap: 0.5rem;">
                <label style=LABEL_STYLE for="avoid-doing">"Avoid doing"</label>
                <textarea style=TEXTAREA_STYLE id="avoid-doing"
                    prop:value=move || form.with(|f| f.avoid_doing.clone())
                    on:input=move |e| dispatch(FieldEdit::AvoidDoing(event_target_value(&e)))
                ></textarea>
            </section>
        </main>
    }
}
