//! Router
//!
//! Static route table, session gate and the active page signal the app
//! renders from.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::containers::{Bills, NewBill};
use crate::models::BillsPage;
use crate::session::SessionContext;
use crate::store::BillStore;
use crate::views::NavIcon;

/// Employee pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Bills,
    NewBill,
}

/// Route name and path table
pub const ROUTES_PATH: &[(Route, &str, &str)] = &[
    (Route::Bills, "Bills", "#employee/bills"),
    (Route::NewBill, "NewBill", "#employee/bill/new"),
];

impl Route {
    pub fn name(&self) -> &'static str {
        ROUTES_PATH
            .iter()
            .find(|(route, _, _)| route == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }

    pub fn path(&self) -> &'static str {
        ROUTES_PATH
            .iter()
            .find(|(route, _, _)| route == self)
            .map(|(_, _, path)| *path)
            .unwrap_or_default()
    }

    pub fn from_path(pathname: &str) -> Option<Self> {
        ROUTES_PATH
            .iter()
            .find(|(_, _, path)| *path == pathname)
            .map(|(route, _, _)| *route)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ROUTES_PATH
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(route, _, _)| *route)
    }

    /// Navigation icon highlighted while this route is shown
    pub fn nav_icon(&self) -> NavIcon {
        match self {
            Route::Bills => NavIcon::Window,
            Route::NewBill => NavIcon::Mail,
        }
    }
}

/// Navigation callback handed to containers
pub type Navigate = Rc<dyn Fn(Route)>;

/// Container behind the shown page
#[derive(Clone)]
pub enum ActivePage {
    Bills(Rc<Bills>),
    NewBill(Rc<NewBill>),
}

impl ActivePage {
    pub fn route(&self) -> Route {
        match self {
            ActivePage::Bills(_) => Route::Bills,
            ActivePage::NewBill(_) => Route::NewBill,
        }
    }
}

pub struct Router {
    store: Option<Rc<dyn BillStore>>,
    session: SessionContext,
    navigate: Navigate,
    active: RwSignal<Option<ActivePage>, LocalStorage>,
    /// Bumped on every accepted navigation
    generation: Cell<u64>,
}

impl Router {
    pub fn new(store: Option<Rc<dyn BillStore>>, session: SessionContext, navigate: Navigate) -> Self {
        Self {
            store,
            session,
            navigate,
            active: RwSignal::new_local(None),
            generation: Cell::new(0),
        }
    }

    /// Page the app renders
    pub fn active(&self) -> ReadSignal<Option<ActivePage>, LocalStorage> {
        self.active.read_only()
    }

    pub fn active_page(&self) -> Option<ActivePage> {
        self.active.get_untracked()
    }

    fn activate(&self, page: ActivePage) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.active.set(Some(page));
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Show the page for `pathname`
    ///
    /// Unknown paths and non-employee sessions leave the current page in
    /// place and return `None`, as does a bills load overtaken by a later
    /// navigation.
    pub async fn on_navigate(&self, pathname: &str) -> Option<Route> {
        let Some(route) = Route::from_path(pathname) else {
            log::debug!("[ROUTER] No route for {:?}", pathname);
            return None;
        };
        match self.session.user() {
            Some(user) if user.is_employee() => {}
            Some(user) => {
                log::warn!("[ROUTER] {:?} user cannot open {}", user.user_type, route.name());
                return None;
            }
            None => {
                log::warn!("[ROUTER] No session user, {} not shown", route.name());
                return None;
            }
        }
        log::debug!("[ROUTER] Navigating to {}", route.name());

        match route {
            Route::Bills => {
                let bills = Rc::new(Bills::new(self.store.clone(), self.navigate.clone()));
                let generation = self.activate(ActivePage::Bills(bills.clone()));

                let result = bills.get_bills().await;
                if !self.is_current(generation) {
                    log::debug!("[ROUTER] Bills load overtaken by a later navigation");
                    return None;
                }
                bills.show(match result {
                    Ok(rows) => BillsPage::Loaded(rows),
                    Err(e) => {
                        log::error!("[ROUTER] Loading bills failed: {}", e);
                        BillsPage::Failed(e.to_string())
                    }
                });
            }
            Route::NewBill => {
                let new_bill = Rc::new(NewBill::new(
                    self.store.clone(),
                    self.session.clone(),
                    self.navigate.clone(),
                ));
                self.activate(ActivePage::NewBill(new_bill));
            }
        }
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use async_trait::async_trait;

    use crate::models::{Bill, CreatedFile, FileUpload, SessionUser};
    use crate::session::{MemoryStorage, SessionStorage, USER_KEY};
    use crate::store::{MockStore, StoreError, StoreResult};

    struct Harness {
        storage: Rc<MemoryStorage>,
        visited: Rc<RefCell<Vec<Route>>>,
        router: Router,
    }

    fn harness(store: Option<Rc<dyn BillStore>>) -> Harness {
        let storage = Rc::new(MemoryStorage::default());
        let session = SessionContext::new(storage.clone());
        session.set_user(&SessionUser::employee("a@a")).unwrap();
        let visited = Rc::new(RefCell::new(Vec::new()));
        let sink = visited.clone();
        let navigate: Navigate = Rc::new(move |route| sink.borrow_mut().push(route));
        let router = Router::new(store, session, navigate);
        Harness { storage, visited, router }
    }

    fn mock_harness() -> Harness {
        harness(Some(Rc::new(MockStore::new()) as Rc<dyn BillStore>))
    }

    fn shown_bills(router: &Router) -> Rc<Bills> {
        match router.active_page() {
            Some(ActivePage::Bills(bills)) => bills,
            _ => panic!("bills page should be active"),
        }
    }

    /// Store whose list resolves only after a few scheduler turns
    struct SlowStore {
        inner: MockStore,
        turns: usize,
    }

    #[async_trait(?Send)]
    impl BillStore for SlowStore {
        async fn list(&self) -> StoreResult<Vec<Bill>> {
            for _ in 0..self.turns {
                tokio::task::yield_now().await;
            }
            self.inner.list().await
        }

        async fn create(&self, upload: &FileUpload) -> StoreResult<CreatedFile> {
            self.inner.create(upload).await
        }

        async fn update(&self, selector: &str, bill: &Bill) -> StoreResult<Bill> {
            self.inner.update(selector, bill).await
        }
    }

    #[test]
    fn test_route_table() {
        assert_eq!(Route::Bills.path(), "#employee/bills");
        assert_eq!(Route::from_path("#employee/bill/new"), Some(Route::NewBill));
        assert_eq!(Route::from_name("Bills"), Some(Route::Bills));
        assert_eq!(Route::NewBill.name(), "NewBill");
        assert_eq!(Route::from_path("#admin/dashboard"), None);
    }

    #[test]
    fn test_each_route_has_its_own_icon() {
        assert_eq!(Route::Bills.nav_icon(), NavIcon::Window);
        assert_eq!(Route::NewBill.nav_icon(), NavIcon::Mail);
    }

    #[tokio::test]
    async fn test_bills_route_loads_rows() {
        let h = mock_harness();
        let route = h.router.on_navigate(Route::Bills.path()).await;
        assert_eq!(route, Some(Route::Bills));

        let bills = shown_bills(&h.router);
        match bills.page_state() {
            BillsPage::Loaded(rows) => assert_eq!(rows.len(), 4),
            other => panic!("expected loaded rows, got {:?}", other),
        }
        assert_eq!(h.router.active().get_untracked().map(|p| p.route()), Some(Route::Bills));
    }

    #[tokio::test]
    async fn test_new_bill_route_shows_form() {
        let h = mock_harness();
        h.router.on_navigate(Route::NewBill.path()).await;
        assert!(matches!(h.router.active_page(), Some(ActivePage::NewBill(_))));
    }

    #[tokio::test]
    async fn test_store_errors_shown_verbatim() {
        for code in [404, 500] {
            let store = Rc::new(MockStore::new());
            store.fail_list(StoreError::Http(code));
            let h = harness(Some(store as Rc<dyn BillStore>));
            h.router.on_navigate(Route::Bills.path()).await;

            let page = shown_bills(&h.router).page_state();
            assert_eq!(page, BillsPage::Failed(format!("Erreur {}", code)));
        }
    }

    #[tokio::test]
    async fn test_unknown_path_shows_nothing() {
        let h = mock_harness();
        assert_eq!(h.router.on_navigate("#nowhere").await, None);
        assert!(h.router.active_page().is_none());
    }

    #[tokio::test]
    async fn test_session_gate() {
        let h = mock_harness();
        h.storage.set_item(USER_KEY, r#"{"type":"Admin","email":"admin@a"}"#);
        assert_eq!(h.router.on_navigate(Route::Bills.path()).await, None);

        h.storage.remove_item(USER_KEY);
        assert_eq!(h.router.on_navigate(Route::NewBill.path()).await, None);
        assert!(h.router.active_page().is_none());
    }

    #[tokio::test]
    async fn test_new_bill_button_requests_navigation() {
        let h = harness(None);
        h.router.on_navigate(Route::Bills.path()).await;
        assert_eq!(shown_bills(&h.router).page_state(), BillsPage::Loaded(Vec::new()));

        shown_bills(&h.router).handle_click_new_bill();
        assert_eq!(*h.visited.borrow(), vec![Route::NewBill]);

        h.router.on_navigate(Route::NewBill.path()).await;
        assert_eq!(h.router.active_page().map(|p| p.route()), Some(Route::NewBill));
    }

    #[tokio::test]
    async fn test_late_bills_load_does_not_replace_newer_page() {
        let store = Rc::new(SlowStore { inner: MockStore::new(), turns: 5 });
        let h = harness(Some(store.clone() as Rc<dyn BillStore>));

        let (bills, new_bill) = tokio::join!(
            h.router.on_navigate(Route::Bills.path()),
            h.router.on_navigate(Route::NewBill.path()),
        );
        assert_eq!(bills, None);
        assert_eq!(new_bill, Some(Route::NewBill));
        assert_eq!(store.inner.list_calls(), 1);
        assert!(matches!(h.router.active_page(), Some(ActivePage::NewBill(_))));
    }

    #[tokio::test]
    async fn test_renavigating_to_bills_reloads() {
        let store = Rc::new(SlowStore { inner: MockStore::new(), turns: 2 });
        let h = harness(Some(store.clone() as Rc<dyn BillStore>));

        let (first, second) = tokio::join!(
            h.router.on_navigate(Route::Bills.path()),
            h.router.on_navigate(Route::Bills.path()),
        );
        assert_eq!(first, None);
        assert_eq!(second, Some(Route::Bills));
        assert!(matches!(shown_bills(&h.router).page_state(), BillsPage::Loaded(_)));
    }
}
