//! Session-scoped match history. Runs live in process memory only, newest first.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::matching::matcher::MatchResult;
use crate::matching::settings::MatchConfig;

/// One invocation of the matcher over a selection, with its filtered results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRun {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub results: Vec<MatchResult>,
    pub selected_cvs: Vec<String>,
    pub selected_rfps: Vec<String>,
    pub settings: MatchConfig,
}

impl MatchRun {
    pub fn new(
        results: Vec<MatchResult>,
        selected_cvs: Vec<String>,
        selected_rfps: Vec<String>,
        settings: MatchConfig,
    ) -> Self {
        Self {
            id: format!("mr-{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            results,
            selected_cvs,
            selected_rfps,
            settings,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    All,
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Timeframe::All),
            "today" => Ok(Timeframe::Today),
            "yesterday" => Ok(Timeframe::Yesterday),
            "this_week" => Ok(Timeframe::ThisWeek),
            "this_month" => Ok(Timeframe::ThisMonth),
            other => Err(format!(
                "unknown timeframe '{other}' (expected all, today, yesterday, this_week or this_month)"
            )),
        }
    }
}

impl Timeframe {
    /// Half-open `[start, end)` window for this timeframe relative to `now`. Days are UTC.
    /// `None` bounds are open.
    pub fn window(
        self,
        now: DateTime<Utc>,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let start_of_today = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
        match self {
            Timeframe::All => (None, None),
            Timeframe::Today => (Some(start_of_today), None),
            Timeframe::Yesterday => (Some(start_of_today - Duration::days(1)), Some(start_of_today)),
            Timeframe::ThisWeek => {
                // Weeks start on Sunday.
                let days_since_sunday = i64::from(now.weekday().num_days_from_sunday());
                (Some(start_of_today - Duration::days(days_since_sunday)), None)
            }
            Timeframe::ThisMonth => {
                let days_into_month = i64::from(now.day0());
                (Some(start_of_today - Duration::days(days_into_month)), None)
            }
        }
    }

    pub fn contains(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.window(now);
        start.map_or(true, |s| timestamp >= s) && end.map_or(true, |e| timestamp < e)
    }
}

/// Keeps the runs that fall inside `timeframe`, preserving order.
pub fn filter_runs<'a>(
    runs: impl IntoIterator<Item = &'a MatchRun>,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<MatchRun> {
    runs.into_iter()
        .filter(|run| timeframe.contains(run.timestamp, now))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Cv,
    Rfp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultGroup {
    pub key: String,
    pub label: String,
    pub results: Vec<MatchResult>,
}

/// Groups results by candidate or request. Groups appear in first-seen order and
/// keep the incoming (score) order inside each group.
pub fn group_results(results: &[MatchResult], group_by: GroupBy) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Vec::new();

    for result in results {
        let (key, label) = match group_by {
            GroupBy::Cv => (&result.cv_id, &result.cv_name),
            GroupBy::Rfp => (&result.rfp_id, &result.rfp_title),
        };

        match groups.iter_mut().find(|g| &g.key == key) {
            Some(group) => group.results.push(result.clone()),
            None => groups.push(ResultGroup {
                key: key.clone(),
                label: label.clone(),
                results: vec![result.clone()],
            }),
        }
    }

    groups
}

/// Bounded, newest-first store of match runs.
pub struct MatchHistory {
    runs: RwLock<VecDeque<MatchRun>>,
    limit: usize,
}

impl MatchHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            runs: RwLock::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }

    /// Adds a run at the front, evicting the oldest runs past the limit.
    pub async fn record(&self, run: MatchRun) {
        let mut runs = self.runs.write().await;
        runs.push_front(run);
        runs.truncate(self.limit);
    }

    pub async fn list(&self, timeframe: Timeframe, now: DateTime<Utc>) -> Vec<MatchRun> {
        let runs = self.runs.read().await;
        filter_runs(runs.iter(), timeframe, now)
    }

    pub async fn get(&self, id: &str) -> Option<MatchRun> {
        self.runs.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn delete(&self, id: &str) -> bool {
        let mut runs = self.runs.write().await;
        let before = runs.len();
        runs.retain(|r| r.id != id);
        runs.len() != before
    }

    pub async fn clear(&self) {
        self.runs.write().await.clear();
    }
}
