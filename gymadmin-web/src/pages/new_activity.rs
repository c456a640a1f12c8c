//! Create-activity page for administrators.

use shared::models::ActivityRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::app::{SessionContext, use_unmount_token};
use crate::components::activity_form::ActivityForm;
use crate::routes::MainRoute;

#[function_component(NewActivityPage)]
pub fn new_activity_page() -> Html {
    let session = use_context::<SessionContext>();
    let cancel = use_unmount_token();
    let navigator = use_navigator();
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let Some(session) = session else {
        return html! {};
    };

    let on_submit = {
        let client = session.client().cancel_on(cancel);
        let error = error.clone();
        let saving = saving.clone();
        Callback::from(move |request: ActivityRequest| {
            saving.set(true);
            error.set(None);
            let client = client.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match client.create_activity(&request).await {
                    Ok(activity) => {
                        tracing::info!(activity_id = activity.id, "activity created");
                        if let Some(nav) = navigator {
                            nav.push(&MainRoute::Activities);
                        }
                    }
                    Err(err) => {
                        error.set(session.report(&err));
                        saving.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="card max-w-xl bg-base-200 shadow">
            <div class="card-body">
                <h1 class="card-title text-2xl">{"New activity"}</h1>
                <ActivityForm
                    initial={ActivityRequest::default()}
                    submit_label="Create"
                    busy={*saving}
                    error={(*error).clone().map(AttrValue::from)}
                    {on_submit}
                />
            </div>
        </div>
    }
}
