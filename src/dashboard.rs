use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::holiday::repository::upcoming_window;
use crate::holiday::{
    HolidayRecord, HolidayRepository, HttpTransport, RepositoryError, SiteContext,
    DEFAULT_LIST_NAME,
};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load holiday data. Please check if the list exists and you have permission to access it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Card,
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub next_holiday: Option<HolidayRecord>,
    pub all_holidays: Vec<HolidayRecord>,
    pub is_loading: bool,
    pub view_mode: ViewMode,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            next_holiday: None,
            all_holidays: Vec::new(),
            is_loading: true,
            view_mode: ViewMode::Card,
            error: None,
        }
    }
}

/// What the dashboard should draw right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardView<'a> {
    Loading,
    Failed(&'a str),
    Card(Option<&'a HolidayRecord>),
    List(&'a [HolidayRecord]),
}

impl DashboardState {
    pub fn view(&self) -> DashboardView<'_> {
        if self.is_loading {
            return DashboardView::Loading;
        }
        if let Some(ref error) = self.error {
            return DashboardView::Failed(error);
        }
        match self.view_mode {
            ViewMode::Card => DashboardView::Card(self.next_holiday.as_ref()),
            ViewMode::List => DashboardView::List(&self.all_holidays),
        }
    }
}

#[derive(Debug, Error)]
enum LoadError {
    #[error("no list binding: {0}")]
    Unbound(String),
    #[error("holiday load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

struct LoadedHolidays {
    next: Option<HolidayRecord>,
    all: Vec<HolidayRecord>,
}

struct LoadCompletion {
    generation: u64,
    outcome: Result<LoadedHolidays, LoadError>,
}

/// Owns the dashboard state and drives load cycles against the configured list.
///
/// Loads run on the tokio runtime and report back over a channel; the state is
/// only ever mutated by the owner through [`Dashboard::poll`] or
/// [`Dashboard::wait_for_load`]. Each load carries a generation number and a
/// completion from a superseded load is dropped.
pub struct Dashboard {
    state: DashboardState,
    site_url: String,
    list_name: String,
    transport: Arc<dyn HttpTransport>,
    repository: Result<Arc<HolidayRepository>, String>,
    generation: u64,
    tx: mpsc::UnboundedSender<LoadCompletion>,
    rx: mpsc::UnboundedReceiver<LoadCompletion>,
}

impl Dashboard {
    pub fn new(site_url: &str, list_name: &str, transport: Arc<dyn HttpTransport>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let list_name = normalize_list_name(list_name);
        let repository = bind(site_url, &list_name, transport.clone());

        Self {
            state: DashboardState::default(),
            site_url: site_url.to_string(),
            list_name,
            transport,
            repository,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn view(&self) -> DashboardView<'_> {
        self.state.view()
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    /// Begin a load cycle. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        self.state.is_loading = true;
        self.state.error = None;

        let repository = match self.repository {
            Ok(ref repository) => repository.clone(),
            Err(ref reason) => {
                let outcome = Err(LoadError::Unbound(reason.clone()));
                self.apply(LoadCompletion {
                    generation,
                    outcome,
                });
                return;
            }
        };

        tracing::info!(list = %self.list_name, generation, "loading holidays");

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let fetch = tokio::spawn(async move {
                let (start, end) = upcoming_window(Utc::now());
                let (next, all) = tokio::join!(
                    repository.fetch_next(),
                    repository.fetch_upcoming(start, end)
                );
                LoadedHolidays { next, all }
            });

            let outcome = fetch.await.map_err(LoadError::from);
            // The receiver lives as long as the dashboard.
            let _ = tx.send(LoadCompletion {
                generation,
                outcome,
            });
        });
    }

    pub fn refresh(&mut self) {
        self.start();
    }

    /// Apply any finished loads without blocking. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait until the current load cycle has settled.
    pub async fn wait_for_load(&mut self) {
        while self.state.is_loading {
            match self.rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    pub fn select_card(&mut self) {
        self.state.view_mode = ViewMode::List;
    }

    pub fn back(&mut self) {
        self.state.view_mode = ViewMode::Card;
    }

    /// Rebind to a different list and reload. A blank name means the default
    /// list. Returns false when the name is unchanged.
    pub fn set_list_name(&mut self, list_name: &str) -> bool {
        let list_name = normalize_list_name(list_name);
        if list_name == self.list_name {
            return false;
        }

        tracing::info!(from = %self.list_name, to = %list_name, "list changed");
        self.list_name = list_name;
        self.repository = bind(&self.site_url, &self.list_name, self.transport.clone());
        self.state = DashboardState::default();
        self.start();
        true
    }

    fn apply(&mut self, completion: LoadCompletion) -> bool {
        if completion.generation != self.generation {
            tracing::debug!(
                stale = completion.generation,
                current = self.generation,
                "discarding superseded holiday load"
            );
            return false;
        }

        match completion.outcome {
            Ok(loaded) => {
                tracing::info!(
                    list = %self.list_name,
                    count = loaded.all.len(),
                    "holidays loaded"
                );
                self.state.next_holiday = loaded.next;
                self.state.all_holidays = loaded.all;
            }
            Err(e) => {
                tracing::error!(list = %self.list_name, "holiday load failed: {}", e);
                self.state.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.state.is_loading = false;
        true
    }
}

fn bind(
    site_url: &str,
    list_name: &str,
    transport: Arc<dyn HttpTransport>,
) -> Result<Arc<HolidayRepository>, String> {
    SiteContext::parse(site_url)
        .and_then(|site| HolidayRepository::new(site, list_name, transport))
        .map(Arc::new)
        .map_err(|e: RepositoryError| {
            tracing::error!(site = %site_url, list = %list_name, "cannot bind holiday list: {}", e);
            e.to_string()
        })
}

fn normalize_list_name(list_name: &str) -> String {
    let trimmed = list_name.trim();
    if trimmed.is_empty() {
        DEFAULT_LIST_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::holiday::transport::fake::FakeTransport;
    use pretty_assertions::assert_eq;

    const SITE: &str = "https://contoso.sharepoint.com/sites/hr";

    fn body(items: &[(i64, &str, &str)]) -> String {
        let items: Vec<String> = items
            .iter()
            .map(|(id, title, date)| {
                format!(
                    r#"{{"Id":{},"Title":"{}","HolidayDate":"{}T00:00:00Z","HolidayType":"Federal"}}"#,
                    id, title, date
                )
            })
            .collect();
        format!(r#"{{"value":[{}]}}"#, items.join(","))
    }

    fn dashboard(transport: FakeTransport, list: &str) -> Dashboard {
        Dashboard::new(SITE, list, Arc::new(transport))
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let dash = dashboard(FakeTransport::new(), "Holidays");
        assert!(dash.state().is_loading);
        assert_eq!(dash.view(), DashboardView::Loading);
        assert_eq!(dash.state().view_mode, ViewMode::Card);
    }

    #[tokio::test]
    async fn test_load_populates_next_and_all() {
        let transport = FakeTransport::new().respond(
            "getbytitle('Holidays')",
            200,
            &body(&[(2, "Labor Day", "2099-09-07"), (1, "Memorial Day", "2099-05-25")]),
        );
        let mut dash = dashboard(transport, "Holidays");
        dash.start();
        dash.wait_for_load().await;

        let state = dash.state();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.next_holiday.as_ref().map(|h| h.id), Some(1));
        assert_eq!(
            state.all_holidays.iter().map(|h| h.title.as_str()).collect::<Vec<_>>(),
            vec!["Memorial Day", "Labor Day"]
        );
        assert!(matches!(dash.view(), DashboardView::Card(Some(h)) if h.id == 1));
    }

    #[tokio::test]
    async fn test_no_holidays_is_ready_without_error() {
        let transport = FakeTransport::new().respond("getbytitle", 200, r#"{"value": []}"#);
        let mut dash = dashboard(transport, "Holidays");
        dash.start();
        dash.wait_for_load().await;

        assert_eq!(dash.state().next_holiday, None);
        assert!(dash.state().all_holidays.is_empty());
        assert!(!dash.state().is_loading);
        assert_eq!(dash.state().error, None);
        assert_eq!(dash.view(), DashboardView::Card(None));
    }

    #[tokio::test]
    async fn test_fetch_failures_degrade_to_empty() {
        let transport = FakeTransport::new().respond("getbytitle", 500, "boom");
        let mut dash = dashboard(transport, "Holidays");
        dash.start();
        dash.wait_for_load().await;

        assert_eq!(dash.state().error, None);
        assert_eq!(dash.state().next_holiday, None);
    }

    #[tokio::test]
    async fn test_invalid_site_sets_error_message() {
        let mut dash = Dashboard::new("not a url", "Holidays", Arc::new(FakeTransport::new()));
        dash.start();
        dash.wait_for_load().await;

        assert!(!dash.state().is_loading);
        assert_eq!(dash.state().error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(dash.view(), DashboardView::Failed(LOAD_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_crashed_fetch_sets_error_message() {
        let mut dash = dashboard(FakeTransport::new().panic("getbytitle"), "Holidays");
        dash.start();
        dash.wait_for_load().await;

        assert!(!dash.state().is_loading);
        assert_eq!(dash.state().error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert!(dash.state().all_holidays.is_empty());
    }

    #[tokio::test]
    async fn test_view_toggle_leaves_load_state_alone() {
        let transport = FakeTransport::new().respond(
            "getbytitle",
            200,
            &body(&[(1, "Memorial Day", "2099-05-25")]),
        );
        let mut dash = dashboard(transport, "Holidays");
        dash.start();
        dash.wait_for_load().await;
        let before = dash.state().clone();

        dash.select_card();
        assert_eq!(dash.state().view_mode, ViewMode::List);
        assert_eq!(
            DashboardState { view_mode: ViewMode::Card, ..dash.state().clone() },
            before
        );
        assert!(matches!(dash.view(), DashboardView::List(items) if items.len() == 1));

        dash.back();
        assert_eq!(dash.state(), &before);
    }

    #[tokio::test]
    async fn test_view_toggle_while_loading() {
        let mut dash = dashboard(FakeTransport::new(), "Holidays");
        dash.select_card();
        assert!(dash.state().is_loading);
        assert_eq!(dash.state().view_mode, ViewMode::List);
        assert_eq!(dash.view(), DashboardView::Loading);
    }

    #[tokio::test]
    async fn test_list_change_discards_stale_load() {
        let transport = FakeTransport::new()
            .respond_after(
                "getbytitle('Slow')",
                Duration::from_millis(80),
                &body(&[(1, "Old Holiday", "2099-01-01")]),
            )
            .respond("getbytitle('Fast')", 200, &body(&[(9, "New Holiday", "2099-02-02")]));
        let mut dash = dashboard(transport, "Slow");
        dash.start();

        assert!(dash.set_list_name("Fast"));
        dash.wait_for_load().await;
        assert_eq!(dash.state().next_holiday.as_ref().map(|h| h.id), Some(9));

        // Let the superseded load finish, then make sure it is ignored.
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!dash.poll());

        let state = dash.state();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.all_holidays.iter().map(|h| h.id).collect::<Vec<_>>(), vec![9]);
        assert_eq!(dash.list_name(), "Fast");
    }

    #[tokio::test]
    async fn test_restart_reflects_only_latest_load() {
        // The first load's two requests get slow, older data; the second load
        // gets the fast route.
        let transport = FakeTransport::new()
            .respond_first(
                "getbytitle",
                2,
                Duration::from_millis(80),
                &body(&[(1, "Old Holiday", "2099-01-01")]),
            )
            .respond("getbytitle", 200, &body(&[(4, "Juneteenth", "2099-06-19")]));
        let mut dash = dashboard(transport, "Holidays");
        dash.start();
        dash.start();
        dash.wait_for_load().await;
        assert_eq!(dash.state().next_holiday.as_ref().map(|h| h.id), Some(4));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!dash.poll());

        let state = dash.state();
        assert!(!state.is_loading);
        assert_eq!(state.all_holidays.iter().map(|h| h.id).collect::<Vec<_>>(), vec![4]);
    }

    #[tokio::test]
    async fn test_set_same_list_name_is_noop() {
        let mut dash = dashboard(FakeTransport::new(), "Holidays");
        assert!(!dash.set_list_name("  Holidays "));
        assert!(dash.set_list_name(""));
        assert_eq!(dash.list_name(), DEFAULT_LIST_NAME);
    }

    #[tokio::test]
    async fn test_list_change_resets_view_mode() {
        let transport = FakeTransport::new().respond("getbytitle", 200, r#"{"value": []}"#);
        let mut dash = dashboard(transport, "Holidays");
        dash.start();
        dash.wait_for_load().await;
        dash.select_card();

        dash.set_list_name("Other Holidays");
        assert!(dash.state().is_loading);
        assert_eq!(dash.state().view_mode, ViewMode::Card);
        dash.wait_for_load().await;
        assert!(!dash.state().is_loading);
    }
}
