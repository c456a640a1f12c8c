use console::access::Section;
use shared::models::SessionUser;
use yew::{Html, function_component, html, use_context};
use yew_router::prelude::*;

use crate::app::SessionContext;
use crate::routes::MainRoute;

/// Landing page: greeting plus a card per section the user may open.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let Some(session) = use_context::<SessionContext>() else {
        return html! {};
    };
    let greeting = session
        .snapshot
        .user
        .as_ref()
        .map_or("", SessionUser::display_name)
        .to_string();
    let role = if session.snapshot.is_admin() {
        "Administrator"
    } else {
        "Member"
    };

    let cards = Section::visible_for(&session.snapshot)
        .into_iter()
        .filter(|section| *section != Section::Dashboard)
        .map(|section| {
            html! {
                <div class="card bg-base-200 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{ section.label() }</h2>
                        <div class="card-actions justify-end">
                            <Link<MainRoute> to={MainRoute::from(section)} classes="btn btn-primary">
                                {"Open"}
                            </Link<MainRoute>>
                        </div>
                    </div>
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{ format!("Welcome, {greeting}") }</h1>
            <p class="text-base-content/70">{ role }</p>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                { cards }
            </div>
        </div>
    }
}
