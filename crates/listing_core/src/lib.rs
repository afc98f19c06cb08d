use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use shared::{
    domain::{DateRange, Record},
    error::FetchResult,
    protocol::{GamesQuery, PageResult, Pagination},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod display;
pub mod error;
pub mod fetcher;
pub mod grouping;
pub mod options;
pub mod query;
pub mod status;
pub mod week;

pub use error::{ClientBuildError, ViewError};
pub use fetcher::{DatasetFetcher, HttpDatasetFetcher};

use display::{PaginationControls, EMPTY_FEATURED_MESSAGE, EMPTY_LIST_MESSAGE};
use fetcher::MAX_SNAPSHOT_PAGE_SIZE;
use grouping::{group_by_date, present_today, DateBucket, GroupingMode, TodayLayout};
use options::{derive_filter_options, FilterOptionSet};
use query::{FilterField, QueryState, QueryStateStore, DEFAULT_PAGE_SIZE};
use week::{local_today, today_window, week_range_from, WeekWindow};

pub const DEFAULT_FEATURED_LIMIT: usize = 8;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        local_today()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    List,
    Options,
    Today,
    Week,
    Featured,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ViewError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub records: Vec<Record>,
    pub pagination: Pagination,
    pub controls: PaginationControls,
    pub placeholder: Option<&'static str>,
}

impl From<PageResult> for ListPage {
    fn from(page: PageResult) -> Self {
        let (pagination, placeholder) = if page.records.is_empty() {
            (Pagination::empty(), Some(EMPTY_LIST_MESSAGE))
        } else {
            (page.pagination.normalized(), None)
        };
        Self {
            records: page.records,
            controls: PaginationControls::from(&pagination),
            pagination,
            placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedPanel {
    pub records: Vec<Record>,
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayView {
    pub date: NaiveDate,
    pub records: Vec<Record>,
}

impl TodayView {
    pub fn layout(&self, mode: GroupingMode) -> TodayLayout {
        present_today(&self.records, mode)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekView {
    pub offset: i64,
    pub window: WeekWindow,
    pub buckets: Vec<DateBucket>,
}

#[derive(Debug, Clone)]
pub enum ListingEvent {
    ViewChanged(ViewKind),
    StaleResponseDiscarded(ViewKind),
}

#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub page_size: u32,
    pub snapshot_page_size: u32,
    pub featured_limit: usize,
    pub today_grouping: GroupingMode,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            snapshot_page_size: MAX_SNAPSHOT_PAGE_SIZE,
            featured_limit: DEFAULT_FEATURED_LIMIT,
            today_grouping: GroupingMode::Flat,
        }
    }
}

/// Point-in-time copy of every view plus the query state behind them.
#[derive(Debug, Clone)]
pub struct ListingViews {
    pub query: QueryState,
    pub options: FilterOptionSet,
    pub week_offset: i64,
    pub list: ViewState<ListPage>,
    pub filter_options: ViewState<FilterOptionSet>,
    pub today: ViewState<TodayView>,
    pub week: ViewState<WeekView>,
    pub featured: ViewState<FeaturedPanel>,
}

/// The request a response was issued for. A response is applied only while
/// its stamp is still the latest one issued for its view.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestStamp {
    seq: u64,
    query: GamesQuery,
}

struct ListingState {
    store: QueryStateStore,
    options: FilterOptionSet,
    week_offset: i64,
    next_seq: u64,
    latest: HashMap<ViewKind, RequestStamp>,
    list: ViewState<ListPage>,
    filter_options: ViewState<FilterOptionSet>,
    today: ViewState<TodayView>,
    week: ViewState<WeekView>,
    featured: ViewState<FeaturedPanel>,
}

impl ListingState {
    fn issue(&mut self, view: ViewKind, query: GamesQuery) -> RequestStamp {
        self.next_seq += 1;
        let stamp = RequestStamp {
            seq: self.next_seq,
            query,
        };
        self.latest.insert(view, stamp.clone());
        match view {
            ViewKind::List => self.list = ViewState::Loading,
            ViewKind::Options => self.filter_options = ViewState::Loading,
            ViewKind::Today => self.today = ViewState::Loading,
            ViewKind::Week => self.week = ViewState::Loading,
            ViewKind::Featured => self.featured = ViewState::Loading,
        }
        stamp
    }

    fn is_current(&self, view: ViewKind, stamp: &RequestStamp) -> bool {
        self.latest.get(&view) == Some(stamp)
    }
}

pub struct ListingClient {
    fetcher: Arc<dyn DatasetFetcher>,
    clock: Arc<dyn Clock>,
    settings: ListingSettings,
    inner: Mutex<ListingState>,
    events: broadcast::Sender<ListingEvent>,
}

impl ListingClient {
    pub fn new(fetcher: Arc<dyn DatasetFetcher>, settings: ListingSettings) -> Arc<Self> {
        Self::new_with_clock(fetcher, settings, Arc::new(LocalClock))
    }

    pub fn new_with_clock(
        fetcher: Arc<dyn DatasetFetcher>,
        settings: ListingSettings,
        clock: Arc<dyn Clock>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            fetcher,
            clock,
            inner: Mutex::new(ListingState {
                store: QueryStateStore::new(settings.page_size),
                options: FilterOptionSet::default(),
                week_offset: 0,
                next_seq: 0,
                latest: HashMap::new(),
                list: ViewState::Idle,
                filter_options: ViewState::Idle,
                today: ViewState::Idle,
                week: ViewState::Idle,
                featured: ViewState::Idle,
            }),
            settings,
            events,
        })
    }

    pub fn settings(&self) -> &ListingSettings {
        &self.settings
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ListingEvent> {
        self.events.subscribe()
    }

    /// Initial page load. The five views load concurrently and each one is
    /// updated only by its own response.
    pub async fn mount(&self) {
        info!("loading catalog views");
        futures::join!(
            self.load_featured(),
            self.load_today(),
            self.load_week(),
            self.load_filter_options(),
            self.load_list(),
        );
    }

    pub async fn set_filter(&self, field: FilterField, value: &str) {
        self.inner.lock().await.store.set_filter(field, value);
    }

    pub async fn set_featured_only(&self, featured_only: bool) {
        self.inner.lock().await.store.set_featured_only(featured_only);
    }

    pub async fn set_date_range(&self, range: Option<DateRange>) {
        self.inner.lock().await.store.set_date_range(range);
    }

    pub async fn reset_filters(&self) {
        self.inner.lock().await.store.reset_filters();
    }

    /// Filter button or Enter in the search box.
    pub async fn submit_filters(&self) {
        self.inner.lock().await.store.rewind();
        self.load_list().await;
    }

    /// Submits the filters landing directly on `page`, for callers that know
    /// the page before any count has been fetched. The server clamps it, so
    /// the loaded pagination says where the list actually is.
    pub async fn submit_filters_at(&self, page: u32) {
        self.inner.lock().await.store.seek(page);
        self.load_list().await;
    }

    /// Returns `false` without fetching when `page` is outside the known range.
    pub async fn go_to_page(&self, page: u32) -> bool {
        if !self.inner.lock().await.store.set_page(page) {
            return false;
        }
        self.load_list().await;
        true
    }

    pub async fn next_page(&self) -> bool {
        if !self.inner.lock().await.store.next_page() {
            return false;
        }
        self.load_list().await;
        true
    }

    pub async fn prev_page(&self) -> bool {
        if !self.inner.lock().await.store.prev_page() {
            return false;
        }
        self.load_list().await;
        true
    }

    /// Returns `false` and leaves the week view untouched when the shifted
    /// offset has no representable calendar week.
    pub async fn shift_week(&self, delta: i64) -> bool {
        let today = self.clock.today();
        {
            let mut guard = self.inner.lock().await;
            let Some(offset) = guard
                .week_offset
                .checked_add(delta)
                .filter(|offset| week_range_from(today, *offset).is_some())
            else {
                warn!(current = guard.week_offset, delta, "week offset out of range");
                return false;
            };
            guard.week_offset = offset;
        }
        self.load_week().await;
        true
    }

    pub async fn reload_featured(&self) {
        self.load_featured().await;
    }

    pub async fn reload_today(&self) {
        self.load_today().await;
    }

    pub async fn reload_options(&self) {
        self.load_filter_options().await;
    }

    pub async fn views(&self) -> ListingViews {
        let guard = self.inner.lock().await;
        ListingViews {
            query: guard.store.state().clone(),
            options: guard.options.clone(),
            week_offset: guard.week_offset,
            list: guard.list.clone(),
            filter_options: guard.filter_options.clone(),
            today: guard.today.clone(),
            week: guard.week.clone(),
            featured: guard.featured.clone(),
        }
    }

    pub async fn list_view(&self) -> ViewState<ListPage> {
        self.inner.lock().await.list.clone()
    }

    pub async fn query_state(&self) -> QueryState {
        self.inner.lock().await.store.state().clone()
    }

    pub async fn today_layout(&self) -> Option<TodayLayout> {
        let guard = self.inner.lock().await;
        guard
            .today
            .loaded()
            .map(|today| today.layout(self.settings.today_grouping))
    }

    async fn load_list(&self) {
        let stamp = {
            let mut guard = self.inner.lock().await;
            let query = guard.store.to_query_params();
            guard.issue(ViewKind::List, query)
        };
        self.emit(ViewKind::List);

        let result = self.fetcher.fetch_page(&stamp.query).await;
        self.complete(ViewKind::List, &stamp, result, |state, page| {
            let page = ListPage::from(page);
            state.store.apply_pagination(&page.pagination);
            info!(
                records = page.records.len(),
                page = page.pagination.current_page,
                total_pages = page.pagination.total_pages,
                "game list loaded"
            );
            state.list = ViewState::Loaded(page);
        })
        .await;
    }

    async fn load_filter_options(&self) {
        let per_page = self.settings.snapshot_page_size;
        let stamp = self
            .inner
            .lock()
            .await
            .issue(ViewKind::Options, GamesQuery::snapshot(per_page));
        self.emit(ViewKind::Options);

        let result = self.fetcher.fetch_snapshot(per_page).await;
        self.complete(ViewKind::Options, &stamp, result, |state, snapshot| {
            let derived = derive_filter_options(&snapshot, &state.store.selection());
            info!(
                snapshot = snapshot.len(),
                statuses = derived.options.statuses.len(),
                sources = derived.options.sources.len(),
                publishers = derived.options.publishers.len(),
                "filter options derived"
            );
            state.store.apply_selection(derived.selection);
            state.options = derived.options.clone();
            state.filter_options = ViewState::Loaded(derived.options);
        })
        .await;
    }

    async fn load_today(&self) {
        let today = self.clock.today();
        let query = GamesQuery::for_window(today_window(today), self.settings.snapshot_page_size);
        let stamp = self.inner.lock().await.issue(ViewKind::Today, query);
        self.emit(ViewKind::Today);

        let result = self.fetcher.fetch_page(&stamp.query).await;
        self.complete(ViewKind::Today, &stamp, result, |state, page| {
            info!(records = page.records.len(), %today, "today's games loaded");
            state.today = ViewState::Loaded(TodayView {
                date: today,
                records: page.records,
            });
        })
        .await;
    }

    async fn load_week(&self) {
        let today = self.clock.today();
        let (offset, window, stamp) = {
            let mut guard = self.inner.lock().await;
            let offset = guard.week_offset;
            let Some(window) = week_range_from(today, offset) else {
                warn!(offset, %today, "no calendar week for offset");
                return;
            };
            let query = GamesQuery::for_window(window.as_range(), self.settings.snapshot_page_size);
            (offset, window, guard.issue(ViewKind::Week, query))
        };
        self.emit(ViewKind::Week);

        let result = self.fetcher.fetch_page(&stamp.query).await;
        self.complete(ViewKind::Week, &stamp, result, |state, page| {
            let buckets = group_by_date(&page.records);
            info!(
                offset,
                start = %window.start,
                end = %window.end,
                buckets = buckets.len(),
                "week loaded"
            );
            state.week = ViewState::Loaded(WeekView {
                offset,
                window,
                buckets,
            });
        })
        .await;
    }

    async fn load_featured(&self) {
        let stamp = self
            .inner
            .lock()
            .await
            .issue(ViewKind::Featured, GamesQuery::default());
        self.emit(ViewKind::Featured);

        let limit = self.settings.featured_limit;
        let result = self.fetcher.fetch_featured().await;
        self.complete(ViewKind::Featured, &stamp, result, |state, mut records| {
            records.truncate(limit);
            info!(records = records.len(), "featured games loaded");
            let placeholder = records.is_empty().then_some(EMPTY_FEATURED_MESSAGE);
            state.featured = ViewState::Loaded(FeaturedPanel {
                records,
                placeholder,
            });
        })
        .await;
    }

    async fn complete<T, F>(
        &self,
        view: ViewKind,
        stamp: &RequestStamp,
        result: FetchResult<T>,
        apply: F,
    ) where
        F: FnOnce(&mut ListingState, T),
    {
        {
            let mut guard = self.inner.lock().await;
            if !guard.is_current(view, stamp) {
                debug!(?view, seq = stamp.seq, "discarding superseded response");
                let _ = self.events.send(ListingEvent::StaleResponseDiscarded(view));
                return;
            }
            match result {
                Ok(value) => apply(&mut *guard, value),
                Err(failure) => {
                    warn!(?view, error = %failure, "catalog view failed to load");
                    let err = ViewError::new(view, failure);
                    match view {
                        ViewKind::List => guard.list = ViewState::Failed(err),
                        ViewKind::Options => guard.filter_options = ViewState::Failed(err),
                        ViewKind::Today => guard.today = ViewState::Failed(err),
                        ViewKind::Week => guard.week = ViewState::Failed(err),
                        ViewKind::Featured => guard.featured = ViewState::Failed(err),
                    }
                }
            }
        }
        self.emit(view);
    }

    fn emit(&self, view: ViewKind) {
        let _ = self.events.send(ListingEvent::ViewChanged(view));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
