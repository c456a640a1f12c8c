//! Activity catalogue.

use console::ConsoleClient;
use shared::models::{Activity, ActivityRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::{SessionContext, use_unmount_token};
use crate::components::activity_form::ActivityForm;

#[derive(Properties, PartialEq)]
struct ActivityRowProps {
    activity: Activity,
    is_admin: bool,
    /// Pre-filled fields while this row is being edited.
    draft: Option<ActivityRequest>,
    saving: bool,
    on_enroll: Callback<(i64, String)>,
    on_edit: Callback<i64>,
    on_delete: Callback<i64>,
    on_save: Callback<(i64, ActivityRequest)>,
    on_cancel_edit: Callback<()>,
}

#[function_component(ActivityRow)]
fn activity_row(props: &ActivityRowProps) -> Html {
    let activity = &props.activity;
    let id = activity.id;

    if let Some(draft) = &props.draft {
        let on_save = props.on_save.reform(move |request| (id, request));
        return html! {
            <tr>
                <td colspan="5">
                    <ActivityForm
                        initial={draft.clone()}
                        submit_label="Save"
                        busy={props.saving}
                        on_submit={on_save}
                        on_cancel={props.on_cancel_edit.clone()}
                    />
                </td>
            </tr>
        };
    }

    let on_enroll = {
        let name = activity.name.clone();
        props.on_enroll.reform(move |_: MouseEvent| (id, name.clone()))
    };
    let on_edit = props.on_edit.reform(move |_: MouseEvent| id);
    let on_delete = props.on_delete.reform(move |_: MouseEvent| id);
    let schedule = activity.schedule.as_ref().map_or_else(String::new, |slot| {
        format!("{} {}-{}", slot.day, slot.starts_at, slot.ends_at)
    });

    html! {
        <tr>
            <td>{ activity.name.clone() }</td>
            <td>{ activity.instructor.clone() }</td>
            <td>{ schedule }</td>
            <td>{ activity.slots.to_string() }</td>
            <td class="flex gap-2">
                <button class="btn btn-primary btn-xs" onclick={on_enroll}>{"Enroll"}</button>
                if props.is_admin {
                    <button class="btn btn-secondary btn-xs" onclick={on_edit}>{"Edit"}</button>
                    <button class="btn btn-error btn-xs" onclick={on_delete}>{"Delete"}</button>
                }
            </td>
        </tr>
    }
}

/// State the row callbacks write to.
#[derive(Clone)]
struct PageHandles {
    generation: UseStateHandle<u32>,
    error: UseStateHandle<Option<String>>,
    notice: UseStateHandle<Option<String>>,
    editing: UseStateHandle<Option<(i64, ActivityRequest)>>,
    saving: UseStateHandle<bool>,
}

impl PageHandles {
    fn reload(&self) {
        self.generation.set(self.generation.wrapping_add(1));
    }
}

struct RowActions {
    enroll: Callback<(i64, String)>,
    edit: Callback<i64>,
    delete: Callback<i64>,
    save: Callback<(i64, ActivityRequest)>,
    cancel_edit: Callback<()>,
}

fn row_actions(
    client: &ConsoleClient,
    session: &SessionContext,
    handles: &PageHandles,
) -> RowActions {
    let enroll = {
        let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
        Callback::from(move |(id, name): (i64, String)| {
            let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
            spawn_local(async move {
                match client.enroll(id).await {
                    Ok(()) => handles.notice.set(Some(format!("Enrolled in {name}"))),
                    Err(err) => handles.error.set(session.report(&err)),
                }
            });
        })
    };

    let edit = {
        let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
        Callback::from(move |id: i64| {
            let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
            spawn_local(async move {
                match client.get_activity(id).await {
                    Ok(current) => {
                        handles.error.set(None);
                        handles
                            .editing
                            .set(Some((id, ActivityRequest::from(&current))));
                    }
                    Err(err) => handles.error.set(session.report(&err)),
                }
            });
        })
    };

    let save = {
        let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
        Callback::from(move |(id, request): (i64, ActivityRequest)| {
            handles.saving.set(true);
            let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
            spawn_local(async move {
                match client.update_activity(id, &request).await {
                    Ok(()) => {
                        tracing::info!(activity_id = id, "activity updated");
                        handles.editing.set(None);
                        handles.reload();
                    }
                    Err(err) => handles.error.set(session.report(&err)),
                }
                handles.saving.set(false);
            });
        })
    };

    let delete = {
        let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
        Callback::from(move |id: i64| {
            let (client, session, handles) = (client.clone(), session.clone(), handles.clone());
            spawn_local(async move {
                match client.delete_activity(id).await {
                    Ok(()) => handles.reload(),
                    Err(err) => handles.error.set(session.report(&err)),
                }
            });
        })
    };

    let cancel_edit = {
        let editing = handles.editing.clone();
        Callback::from(move |()| editing.set(None))
    };

    RowActions {
        enroll,
        edit,
        delete,
        save,
        cancel_edit,
    }
}

fn render_rows(
    activities: Option<&[Activity]>,
    editing: Option<&(i64, ActivityRequest)>,
    is_admin: bool,
    saving: bool,
    actions: &RowActions,
) -> Html {
    let Some(list) = activities else {
        return html! { <tr><td colspan="5">{"Loading activities..."}</td></tr> };
    };
    if list.is_empty() {
        return html! { <tr><td colspan="5">{"No activities found"}</td></tr> };
    }
    list.iter()
        .map(|activity| {
            let draft = editing
                .filter(|(editing_id, _)| *editing_id == activity.id)
                .map(|(_, draft)| draft.clone());
            html! {
                <ActivityRow
                    key={activity.id.to_string()}
                    activity={activity.clone()}
                    {is_admin}
                    {draft}
                    {saving}
                    on_enroll={actions.enroll.clone()}
                    on_edit={actions.edit.clone()}
                    on_delete={actions.delete.clone()}
                    on_save={actions.save.clone()}
                    on_cancel_edit={actions.cancel_edit.clone()}
                />
            }
        })
        .collect()
}

/// Activity catalogue: search and enroll; administrators also edit inline
/// and delete.
#[function_component(ActivitiesPage)]
pub fn activities_page() -> Html {
    let session = use_context::<SessionContext>();
    let cancel = use_unmount_token();
    let activities = use_state(|| None::<Vec<Activity>>);
    let term = use_state(String::new);
    let generation = use_state(|| 0_u32);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let editing = use_state(|| None::<(i64, ActivityRequest)>);
    let saving = use_state(|| false);

    {
        let session = session.clone();
        let cancel = cancel.clone();
        let activities = activities.clone();
        let error = error.clone();
        let term = (*term).clone();
        use_effect_with(*generation, move |_| {
            if let Some(session) = session {
                let client = session.client().cancel_on(cancel);
                spawn_local(async move {
                    match client.search_activities(&term).await {
                        Ok(found) => activities.set(Some(found)),
                        Err(err) => error.set(session.report(&err)),
                    }
                });
            }
            || ()
        });
    }

    let Some(session) = session else {
        return html! {};
    };
    let client = session.client().cancel_on(cancel);

    let on_term_change = {
        let term = term.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                term.set(input.value());
            }
        })
    };

    let on_search = {
        let generation = generation.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            error.set(None);
            generation.set(generation.wrapping_add(1));
        })
    };

    let handles = PageHandles {
        generation: generation.clone(),
        error: error.clone(),
        notice: notice.clone(),
        editing: editing.clone(),
        saving: saving.clone(),
    };
    let actions = row_actions(&client, &session, &handles);

    let rows = render_rows(
        (*activities).as_deref(),
        (*editing).as_ref(),
        session.snapshot.is_admin(),
        *saving,
        &actions,
    );

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">{"Activities"}</h1>
            <form class="flex gap-2" onsubmit={on_search}>
                <input
                    class="input input-bordered"
                    type="search"
                    placeholder="Search by name"
                    value={(*term).clone()}
                    oninput={on_term_change}
                />
                <button class="btn" type="submit">{"Search"}</button>
            </form>
            if let Some(message) = &*notice {
                <div class="alert alert-success"><span>{ message.clone() }</span></div>
            }
            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{ message.clone() }</span></div>
            }
            <table class="table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Instructor"}</th>
                        <th>{"Schedule"}</th>
                        <th>{"Slots"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{ rows }</tbody>
            </table>
        </div>
    }
}
