//! Application root and the session context every view reads.

use console::{
    ApiError, AuthSessionManager, ConsoleClient, ConsoleConfig, RequestError, SessionSnapshot,
    SessionStore,
};
use tokio_util::sync::CancellationToken;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::{MainRoute, switch};

/// What every view gets from the application root.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionContext {
    /// The single session manager of this tab.
    pub manager: AuthSessionManager,
    /// Session state as of the last refresh.
    pub snapshot: SessionSnapshot,
    /// Re-read the manager after login, logout or a refused request.
    pub refresh: Callback<()>,
}

impl SessionContext {
    /// Typed backend client for this session.
    pub fn client(&self) -> ConsoleClient {
        ConsoleClient::new(self.manager.clone())
    }

    /// Text for a failed call, `None` when the view was torn down. Refreshes
    /// first when the backend refused the token, so an interceptor logout
    /// reaches the router.
    pub fn report(&self, err: &ApiError) -> Option<String> {
        if matches!(err, ApiError::Request(RequestError::Cancelled)) {
            return None;
        }
        if err.is_unauthorized() {
            self.refresh.emit(());
        }
        Some(err.to_string())
    }

    /// Log out and let the router react.
    pub fn logout(&self) {
        self.manager.logout();
        self.refresh.emit(());
    }
}

/// Token cancelled when the calling component unmounts.
#[hook]
pub fn use_unmount_token() -> CancellationToken {
    let token = use_memo((), |()| CancellationToken::new());
    {
        let token = token.clone();
        use_effect_with((), move |()| move || token.cancel());
    }
    (*token).clone()
}

#[function_component(App)]
pub fn app() -> Html {
    let manager =
        use_state(|| AuthSessionManager::new(SessionStore::browser(), ConsoleConfig::new()));
    let snapshot = use_state(|| manager.snapshot());

    let refresh = {
        let manager = manager.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |()| snapshot.set(manager.snapshot()))
    };

    let context = SessionContext {
        manager: (*manager).clone(),
        snapshot: (*snapshot).clone(),
        refresh,
    };

    html! {
        <ContextProvider<SessionContext> {context}>
            <BrowserRouter>
                <Switch<MainRoute> render={switch} />
            </BrowserRouter>
        </ContextProvider<SessionContext>>
    }
}
