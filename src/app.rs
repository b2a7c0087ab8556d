//! Billed Frontend App
//!
//! Root component: owns the current route, follows the location hash and
//! renders the page of the router's active container.

use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::AppConfig;
use crate::models::SessionUser;
use crate::router::{ActivePage, Navigate, Route, Router};
use crate::session::{BrowserStorage, MemoryStorage, SessionContext, SessionStorage};
use crate::store::{BillStore, MockStore};
use crate::views::{BillsView, NewBillView};

fn current_route() -> Option<Route> {
    let hash = web_sys::window()?.location().hash().ok()?;
    Route::from_path(&hash)
}

/// Route to switch to after the location hash became `hash`
fn hash_route_change(hash: &str, current: Route) -> Option<Route> {
    Route::from_path(hash).filter(|next| *next != current)
}

fn session_context(config: &AppConfig) -> SessionContext {
    let storage: Rc<dyn SessionStorage> = match BrowserStorage::local() {
        Some(storage) => Rc::new(storage),
        None => {
            log::warn!("[APP] localStorage unavailable, session kept in memory");
            Rc::new(MemoryStorage::default())
        }
    };
    let session = SessionContext::new(storage);
    if let (Some(email), None) = (config.seed_user_email.as_deref(), session.user()) {
        if let Err(e) = session.set_user(&SessionUser::employee(email)) {
            log::error!("[APP] Could not seed session user: {}", e);
        }
    }
    session
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let session = session_context(&config);
    let store: Rc<dyn BillStore> = Rc::new(MockStore::new());

    let route = RwSignal::new(current_route().unwrap_or(config.default_route));

    let navigate: Navigate = Rc::new(move |next: Route| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(next.path());
        }
        route.set(next);
    });
    let router = Router::new(Some(store), session, navigate);
    let active = router.active();
    let router = StoredValue::new_local(Rc::new(router));

    // Render the page whenever the route changes
    Effect::new(move |_| {
        let next = route.get();
        let router = router.get_value();
        spawn_local(async move {
            router.on_navigate(next.path()).await;
        });
    });

    // Back/forward and manual hash edits
    let hash_listener = window_event_listener(ev::hashchange, move |_| {
        let hash = web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default();
        if let Some(next) = hash_route_change(&hash, route.get_untracked()) {
            log::debug!("[APP] Location hash moved to {}", next.name());
            route.set(next);
        }
    });
    on_cleanup(move || hash_listener.remove());

    let modal_width = config.modal_width;

    view! {
        <div id="root">
            {move || active.get().map(|page| match page {
                ActivePage::Bills(bills) => view! { <BillsView bills=bills modal_width=modal_width /> }.into_any(),
                ActivePage::NewBill(new_bill) => view! { <NewBillView new_bill=new_bill /> }.into_any(),
            })}
        </div>
    }
}
