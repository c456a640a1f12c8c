use shared::models::Enrollment;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::{SessionContext, use_unmount_token};

/// Enrollments of the logged-in user, with cancellation.
#[function_component(MyActivitiesPage)]
pub fn my_activities_page() -> Html {
    let session = use_context::<SessionContext>();
    let cancel = use_unmount_token();
    let enrollments = use_state(|| None::<Vec<Enrollment>>);
    let generation = use_state(|| 0_u32);
    let error = use_state(|| None::<String>);

    {
        let session = session.clone();
        let cancel = cancel.clone();
        let enrollments = enrollments.clone();
        let error = error.clone();
        use_effect_with(*generation, move |_| {
            if let Some(session) = session {
                let client = session.client().cancel_on(cancel);
                spawn_local(async move {
                    match client.my_enrollments().await {
                        Ok(list) => enrollments.set(Some(list)),
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

    let items = match &*enrollments {
        None => html! { <li>{"Loading enrollments..."}</li> },
        Some(list) if list.is_empty() => html! { <li>{"You are not enrolled in any activity"}</li> },
        Some(list) => list
            .iter()
            .map(|enrollment| {
                let id = enrollment.id;
                let on_cancel = {
                    let client = client.clone();
                    let session = session.clone();
                    let generation = generation.clone();
                    let error = error.clone();
                    Callback::from(move |_: MouseEvent| {
                        let client = client.clone();
                        let session = session.clone();
                        let generation = generation.clone();
                        let error = error.clone();
                        spawn_local(async move {
                            match client.cancel_enrollment(id).await {
                                Ok(()) => generation.set(generation.wrapping_add(1)),
                                Err(err) => error.set(session.report(&err)),
                            }
                        });
                    })
                };
                let title = enrollment.activity.as_ref().map_or_else(
                    || format!("Activity #{}", enrollment.activity_id),
                    |activity| activity.name.clone(),
                );
                html! {
                    <li key={id.to_string()} class="flex items-center justify-between p-2 bg-base-200 rounded">
                        <span>{ title }</span>
                        <span class="badge">{ enrollment.status.clone() }</span>
                        <button class="btn btn-warning btn-xs" onclick={on_cancel}>{"Cancel"}</button>
                    </li>
                }
            })
            .collect::<Html>(),
    };

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">{"My activities"}</h1>
            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{ message.clone() }</span></div>
            }
            <ul class="space-y-2">{ items }</ul>
        </div>
    }
}
