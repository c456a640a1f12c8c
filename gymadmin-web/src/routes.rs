//! Console routes, each gated on the session before its page renders.

use console::access::{GateDecision, Section, ViewRequirement, evaluate};
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::SessionContext;
use crate::components::layout::Layout;
use crate::components::loading::Loading;
use crate::pages::{
    ActivitiesPage, DashboardPage, LoginPage, MyActivitiesPage, NewActivityPage, UsersPage,
};

/// The console routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/activities")]
    Activities,
    #[at("/activities/new")]
    NewActivity,
    #[at("/my-activities")]
    MyActivities,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Who may open this route.
    pub fn requirement(self) -> ViewRequirement {
        match self {
            Self::Login => ViewRequirement::Public,
            Self::NewActivity | Self::Users => ViewRequirement::Admin,
            Self::Dashboard | Self::Activities | Self::MyActivities | Self::NotFound => {
                ViewRequirement::Authenticated
            }
        }
    }
}

impl From<Section> for MainRoute {
    fn from(section: Section) -> Self {
        match section {
            Section::Dashboard => Self::Dashboard,
            Section::Activities => Self::Activities,
            Section::MyActivities => Self::MyActivities,
            Section::NewActivity => Self::NewActivity,
            Section::Users => Self::Users,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: MainRoute,
}

#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let Some(session) = use_context::<SessionContext>() else {
        tracing::error!("route rendered outside the session provider");
        return html! {};
    };

    match evaluate(props.route.requirement(), &session.snapshot) {
        GateDecision::Loading => html! { <Loading /> },
        GateDecision::RedirectToLogin => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        GateDecision::RedirectToHome => {
            html! { <Redirect<MainRoute> to={MainRoute::Dashboard} /> }
        }
        GateDecision::Render => render(props.route),
    }
}

fn render(route: MainRoute) -> Html {
    let page = match route {
        MainRoute::Login => return html! { <LoginPage /> },
        MainRoute::NotFound => return html! { <Redirect<MainRoute> to={MainRoute::Dashboard} /> },
        MainRoute::Dashboard => html! { <DashboardPage /> },
        MainRoute::Activities => html! { <ActivitiesPage /> },
        MainRoute::NewActivity => html! { <NewActivityPage /> },
        MainRoute::MyActivities => html! { <MyActivitiesPage /> },
        MainRoute::Users => html! { <UsersPage /> },
    };
    html! { <Layout current_route={route}>{page}</Layout> }
}

/// Switch function for the console routes.
pub fn switch(route: MainRoute) -> Html {
    tracing::debug!(?route, "switching route");
    html! { <RouteView {route} /> }
}
