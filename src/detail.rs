//! Company profile: the record itself plus the charts around its event date.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use itertools::{Itertools, MinMaxResult};
use log::{debug, warn};
use tokio::sync::mpsc;

use crate::{
    CHANNEL_BUFFER_DEFAULT,
    ds::DirectoryApi,
    error::IiError,
    model::{CompanyRecord, FinanceSnapshot, StockPoint, Trend},
    utils::datetime::{date_to_day_label, date_to_month_label},
};

pub static COMPANY_NOT_FOUND_MESSAGE: &str = "Company details not found";
pub static NO_TICKER_MESSAGE: &str = "No ticker symbol available for this company.";
pub static FINANCE_UNAVAILABLE_MESSAGE: &str = "Financial data could not be retrieved.";
pub static BEFORE_UNAVAILABLE_MESSAGE: &str =
    "Stock data is not available for the 6 months before the event.";
pub static AFTER_UNAVAILABLE_MESSAGE: &str =
    "Stock data is not available for the 6 months after the event.";
pub static REVENUE_UNAVAILABLE_MESSAGE: &str = "Revenue data not available.";

#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    Loading,
    Failed(String),
    Loaded(Box<CompanyDetail>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompanyDetail {
    pub company: CompanyRecord,
    pub finance: FinancePanel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FinancePanel {
    Charts(FinanceCharts),
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FinanceCharts {
    pub before: StockChart,
    pub after: StockChart,
    pub revenue: RevenueChart,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StockChart {
    pub title: &'static str,
    pub points: Vec<ChartPoint>,
    pub trend: Trend,
    pub fallback: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevenueChart {
    pub title: &'static str,
    pub points: Vec<ChartPoint>,
    pub fallback: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub label: String,
    pub value: f64,
}

/// Fetches the company, then its finance snapshot when it has a ticker.
///
/// Only a failure of the first fetch fails the whole detail; finance problems
/// degrade to a message in place of the charts.
pub async fn load_company_detail(
    source: &dyn DirectoryApi,
    name: &str,
) -> Result<CompanyDetail, String> {
    let company = match source.company(name).await {
        Ok(company) => company,
        Err(err) => {
            warn!("[Detail] Company '{name}' fetch failed: {err}");
            return Err(company_error_message(&err));
        }
    };

    let finance = if company.ticker.is_some() {
        match source.finance(&company.name).await {
            Ok(snapshot) => FinancePanel::from_snapshot(&snapshot),
            Err(err) => {
                warn!("[Detail] Finance '{}' fetch failed: {err}", company.name);
                FinancePanel::Unavailable(
                    err.server_message()
                        .unwrap_or(FINANCE_UNAVAILABLE_MESSAGE)
                        .to_string(),
                )
            }
        }
    } else {
        FinancePanel::Unavailable(NO_TICKER_MESSAGE.to_string())
    };

    Ok(CompanyDetail { company, finance })
}

fn company_error_message(err: &IiError) -> String {
    match err {
        IiError::HttpRequestError(_) => err.to_string(),
        _ => err
            .server_message()
            .unwrap_or(COMPANY_NOT_FOUND_MESSAGE)
            .to_string(),
    }
}

impl From<Result<CompanyDetail, String>> for DetailState {
    fn from(result: Result<CompanyDetail, String>) -> Self {
        match result {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(message) => DetailState::Failed(message),
        }
    }
}

impl FinancePanel {
    pub fn from_snapshot(snapshot: &FinanceSnapshot) -> Self {
        match &snapshot.error {
            Some(error) => FinancePanel::Unavailable(error.to_string()),
            None => FinancePanel::Charts(FinanceCharts::from_snapshot(snapshot)),
        }
    }
}

impl FinanceCharts {
    pub fn from_snapshot(snapshot: &FinanceSnapshot) -> Self {
        let stock_points = |data: &[StockPoint]| {
            data.iter()
                .map(|p| ChartPoint {
                    date: p.date,
                    label: date_to_day_label(&p.date),
                    value: p.close,
                })
                .collect::<Vec<_>>()
        };

        Self {
            before: StockChart {
                title: "Stock Price: 6 Months Before Event",
                points: stock_points(&snapshot.before_stock_data),
                trend: snapshot.before_trend,
                fallback: BEFORE_UNAVAILABLE_MESSAGE.to_string(),
            },
            after: StockChart {
                title: "Stock Price: 6 Months After Event",
                points: stock_points(&snapshot.after_stock_data),
                trend: snapshot.after_trend,
                fallback: AFTER_UNAVAILABLE_MESSAGE.to_string(),
            },
            revenue: RevenueChart {
                title: "Quarterly Revenue",
                points: snapshot
                    .revenue_data
                    .iter()
                    .map(|p| ChartPoint {
                        date: p.date,
                        label: date_to_month_label(&p.date),
                        value: p.revenue,
                    })
                    .collect(),
                fallback: snapshot
                    .revenue_error()
                    .unwrap_or(REVENUE_UNAVAILABLE_MESSAGE)
                    .to_string(),
            },
        }
    }
}

impl StockChart {
    pub fn is_available(&self) -> bool {
        !self.points.is_empty()
    }

    /// Lowest and highest close, so the axis spans the data rather than starting at zero.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        match self.points.iter().map(|p| p.value).minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some((v, v)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// X axis tick text; `offset` is days since the first point.
    pub fn axis_label(&self, offset: f64) -> String {
        match self.points.first() {
            Some(first) if offset.is_finite() && offset >= 0.0 => first
                .date
                .checked_add_days(Days::new(offset.round() as u64))
                .map(|date| date_to_day_label(&date))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl RevenueChart {
    pub fn is_available(&self) -> bool {
        !self.points.is_empty()
    }

    /// X axis tick text; bars sit at their index, other marks stay blank.
    pub fn axis_label(&self, mark: f64) -> String {
        let index = mark.round();
        if !mark.is_finite() || index < 0.0 || (mark - index).abs() > 1e-6 {
            return String::new();
        }

        self.points
            .get(index as usize)
            .map(|p| p.label.clone())
            .unwrap_or_default()
    }
}

/// Detail view session, reloaded whenever the company name changes.
pub struct DetailSession {
    source: Arc<dyn DirectoryApi>,
    company_name: Option<String>,
    state: DetailState,

    request_id: u64,
    event_sender: mpsc::Sender<DetailEvent>,
    event_receiver: mpsc::Receiver<DetailEvent>,
}

struct DetailEvent {
    request_id: u64,
    state: DetailState,
}

impl DetailSession {
    pub fn new(source: Arc<dyn DirectoryApi>) -> Self {
        let (event_sender, event_receiver) = mpsc::channel::<DetailEvent>(CHANNEL_BUFFER_DEFAULT);

        Self {
            source,
            company_name: None,
            state: DetailState::Loading,

            request_id: 0,
            event_sender,
            event_receiver,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == DetailState::Loading
    }

    /// Resets to loading and fetches `name`. Must be called within a tokio runtime.
    pub fn open(&mut self, name: &str) {
        self.request_id += 1;
        self.company_name = Some(name.to_string());
        self.state = DetailState::Loading;

        let request_id = self.request_id;
        let source = self.source.clone();
        let event_sender = self.event_sender.clone();
        let name = name.to_string();

        debug!("[Detail] #{request_id} '{name}'");
        tokio::spawn(async move {
            let state = load_company_detail(source.as_ref(), &name).await.into();
            let _ = event_sender.send(DetailEvent { request_id, state }).await;
        });
    }

    /// Forgets the current company; any load still in flight is discarded.
    pub fn close(&mut self) {
        self.request_id += 1;
        self.company_name = None;
        self.state = DetailState::Loading;
    }

    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_receiver.try_recv() {
            changed |= self.on_event(event);
        }
        changed
    }

    pub async fn recv(&mut self) -> bool {
        match self.event_receiver.recv().await {
            Some(event) => self.on_event(event),
            None => false,
        }
    }

    fn on_event(&mut self, event: DetailEvent) -> bool {
        if event.request_id != self.request_id {
            debug!("[Detail] Discard stale #{}", event.request_id);
            return false;
        }

        self.state = event.state;
        true
    }
}
