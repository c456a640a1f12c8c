//! Page frame with the role-filtered navigation bar.

use console::access::Section;
use yew::{Callback, Children, Html, Properties, classes, function_component, html, use_context};
use yew_router::prelude::*;

use crate::app::SessionContext;
use crate::routes::MainRoute;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub current_route: MainRoute,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let Some(session) = use_context::<SessionContext>() else {
        return html! {};
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| session.logout())
    };

    let user_label = session
        .snapshot
        .user
        .as_ref()
        .map_or_else(String::new, |user| user.display_name().to_string());
    let is_admin = session.snapshot.is_admin();

    let nav_items = Section::visible_for(&session.snapshot)
        .into_iter()
        .map(|section| {
            let route = MainRoute::from(section);
            let active = route == props.current_route;
            html! {
                <li>
                    <Link<MainRoute> to={route} classes={classes!(active.then_some("active"))}>
                        { section.label() }
                    </Link<MainRoute>>
                </li>
            }
        })
        .collect::<Html>();

    html! {
    <>
        <header class="navbar bg-base-200 shadow">
            <div class="flex-1">
                <span class="text-xl font-bold px-2">{"GymAdmin"}</span>
                <ul class="menu menu-horizontal px-1">{nav_items}</ul>
            </div>
            <div class="flex-none gap-2">
                <span>{user_label}</span>
                if is_admin {
                    <span class="badge badge-secondary">{"admin"}</span>
                }
                <button class="btn btn-ghost btn-sm" onclick={on_logout}>{"Log out"}</button>
            </div>
        </header>
        <main class="min-h-screen bg-base-100 p-4">
            {props.children.clone()}
        </main>
    </>
    }
}
