use shared::models::UserSummary;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::{SessionContext, use_unmount_token};

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let session = use_context::<SessionContext>();
    let cancel = use_unmount_token();
    let users = use_state(|| None::<Vec<UserSummary>>);
    let generation = use_state(|| 0_u32);
    let error = use_state(|| None::<String>);

    {
        let session = session.clone();
        let cancel = cancel.clone();
        let users = users.clone();
        let error = error.clone();
        use_effect_with(*generation, move |_| {
            if let Some(session) = session {
                let client = session.client().cancel_on(cancel);
                spawn_local(async move {
                    match client.list_users().await {
                        Ok(list) => users.set(Some(list)),
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
    let own_id = session.manager.current_user_id();

    let rows = match &*users {
        None => html! { <tr><td colspan="4">{"Loading users..."}</td></tr> },
        Some(list) => list
            .iter()
            .map(|user| {
                let id = user.id;
                let on_delete = {
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
                            match client.delete_user(id).await {
                                Ok(()) => generation.set(generation.wrapping_add(1)),
                                Err(err) => error.set(session.report(&err)),
                            }
                        });
                    })
                };
                html! {
                    <tr key={id.to_string()}>
                        <td>{ id.to_string() }</td>
                        <td>{ user.username.clone() }</td>
                        <td>{ if user.is_admin { "admin" } else { "member" } }</td>
                        <td>
                            if own_id != Some(id) {
                                <button class="btn btn-error btn-xs" onclick={on_delete}>{"Delete"}</button>
                            }
                        </td>
                    </tr>
                }
            })
            .collect::<Html>(),
    };

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">{"Users"}</h1>
            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{ message.clone() }</span></div>
            }
            <table class="table">
                <thead>
                    <tr><th>{"Id"}</th><th>{"Username"}</th><th>{"Role"}</th><th></th></tr>
                </thead>
                <tbody>{ rows }</tbody>
            </table>
        </div>
    }
}
