//! Activity fields form, shared by the create page and the inline editor on
//! the activities list.

use shared::models::ActivityRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Properties for [`ActivityForm`].
#[derive(Properties, PartialEq)]
pub struct ActivityFormProps {
    /// Values the fields start with.
    pub initial: ActivityRequest,
    /// Label of the submit button.
    pub submit_label: AttrValue,
    /// Disables submission while a save is running.
    #[prop_or_default]
    pub busy: bool,
    /// Backend error to show above the fields.
    #[prop_or_default]
    pub error: Option<AttrValue>,
    /// Receives the validated payload.
    pub on_submit: Callback<ActivityRequest>,
    /// Shows a cancel button when set.
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
}

fn text_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

#[function_component(ActivityForm)]
pub fn activity_form(props: &ActivityFormProps) -> Html {
    let name = use_state(|| props.initial.name.clone());
    let instructor = use_state(|| props.initial.instructor.clone());
    let slots = use_state(|| props.initial.slots.to_string());
    let category = use_state(|| props.initial.category.clone());
    let description = use_state(|| props.initial.description.clone());
    let invalid = use_state(|| None::<String>);

    let onsubmit = {
        let (name, instructor, slots, category, description) = (
            name.clone(),
            instructor.clone(),
            slots.clone(),
            category.clone(),
            description.clone(),
        );
        let invalid = invalid.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Ok(slot_count) = slots.trim().parse::<u32>() else {
                invalid.set(Some("Slots must be a whole number".to_string()));
                return;
            };
            invalid.set(None);
            on_submit.emit(ActivityRequest {
                name: name.trim().to_string(),
                instructor: instructor.trim().to_string(),
                slots: slot_count,
                category: category.trim().to_string(),
                description: description.trim().to_string(),
            });
        })
    };

    let message = (*invalid)
        .clone()
        .map(AttrValue::from)
        .or_else(|| props.error.clone());
    let disable_submit = props.busy || name.trim().is_empty() || slots.trim().is_empty();

    html! {
        <form class="flex flex-col gap-2" {onsubmit}>
            if let Some(message) = message {
                <div class="alert alert-error"><span>{ message }</span></div>
            }
            <input class="input input-bordered" placeholder="Name"
                value={(*name).clone()} oninput={text_input(&name)} />
            <input class="input input-bordered" placeholder="Instructor"
                value={(*instructor).clone()} oninput={text_input(&instructor)} />
            <input class="input input-bordered" type="number" min="0" placeholder="Slots"
                value={(*slots).clone()} oninput={text_input(&slots)} />
            <input class="input input-bordered" placeholder="Category"
                value={(*category).clone()} oninput={text_input(&category)} />
            <input class="input input-bordered" placeholder="Description"
                value={(*description).clone()} oninput={text_input(&description)} />
            <div class="flex justify-end gap-2">
                if let Some(on_cancel) = props.on_cancel.clone() {
                    <button class="btn btn-ghost" type="button"
                        onclick={move |_: MouseEvent| on_cancel.emit(())}>{"Cancel"}</button>
                }
                <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                    {if props.busy { "Saving..." } else { props.submit_label.as_str() }}
                </button>
            </div>
        </form>
    }
}
