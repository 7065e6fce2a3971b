use crate::quote::client::TickerClient;
use crate::widget::asset::WidgetSpec;
use crate::widget::entry::DisplayEntry;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use tracing::instrument;

pub const REFRESH_INTERVAL_MINUTES: i64 = 15;

/// Entries to display, and when the host should ask for a new timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub entries: Vec<DisplayEntry>,
    pub next_refresh: DateTime<Utc>,
}

/// Answers the host's refresh calls for one widget. Every call is an
/// independent fetch; nothing is kept between calls.
#[derive(Clone, Debug)]
pub struct TimelineProvider {
    client: TickerClient,
    widget: WidgetSpec,
}

impl TimelineProvider {
    pub fn new(client: TickerClient, widget: WidgetSpec) -> Self {
        Self { client, widget }
    }

    pub fn widget(&self) -> &WidgetSpec {
        &self.widget
    }

    /// Preview entry for design-time rendering. Never touches the network.
    pub fn placeholder(&self) -> DisplayEntry {
        self.placeholder_at(Utc::now())
    }

    pub fn placeholder_at(&self, now: DateTime<Utc>) -> DisplayEntry {
        DisplayEntry {
            date: now,
            data: self.widget.preview.clone(),
            error: false,
        }
    }

    pub async fn snapshot(&self) -> DisplayEntry {
        self.snapshot_at(Utc::now()).await
    }

    #[instrument(skip(self), fields(widget = self.widget.kind))]
    pub async fn snapshot_at(&self, now: DateTime<Utc>) -> DisplayEntry {
        let fetched = self.client.fetch(self.widget.symbol_pair).await;
        DisplayEntry::build(now, fetched)
    }

    pub async fn timeline(&self) -> Timeline {
        self.timeline_at(Utc::now()).await
    }

    /// One entry dated `now`; the host should call again at `now + 15 minutes`.
    #[instrument(skip(self), fields(widget = self.widget.kind))]
    pub async fn timeline_at(&self, now: DateTime<Utc>) -> Timeline {
        let fetched = self.client.fetch(self.widget.symbol_pair).await;
        let entry = DisplayEntry::build(now, fetched);
        let next_refresh = now + Duration::minutes(REFRESH_INTERVAL_MINUTES);

        debug!(
            "Built timeline for {} (error = {}), next refresh at {}",
            self.widget.symbol_pair, entry.error, next_refresh
        );

        Timeline {
            entries: vec![entry],
            next_refresh,
        }
    }

    /// Completion-style form of [`TimelineProvider::snapshot`].
    pub async fn get_snapshot<F>(&self, completion: F)
    where
        F: FnOnce(DisplayEntry),
    {
        completion(self.snapshot().await)
    }

    /// Completion-style form of [`TimelineProvider::timeline`].
    pub async fn get_timeline<F>(&self, completion: F)
    where
        F: FnOnce(Timeline),
    {
        completion(self.timeline().await)
    }
}
