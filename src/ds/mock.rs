//! In-memory directory used by unit tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::sleep;

use crate::{
    ds::DirectoryApi,
    error::{IiError, IiResult},
    model::{CompaniesPage, CompanyRecord, FinanceSnapshot, Pagination},
};

#[derive(Clone, Debug, PartialEq)]
pub enum MockCall {
    Companies(String, u32),
    Suggestions(String),
    Company(String),
    Finance(String),
}

pub enum MockFinance {
    Snapshot(FinanceSnapshot),
    Status(u16, Option<String>),
}

#[derive(Default)]
pub struct MockDirectory {
    companies: Vec<CompanyRecord>,
    finance: HashMap<String, MockFinance>,
    companies_delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<MockCall>>,
    pub fail_companies: AtomicBool,
    pub fail_suggestions: AtomicBool,
}

pub fn company(name: &str, description: &str, ticker: Option<&str>) -> CompanyRecord {
    CompanyRecord {
        name: name.to_string(),
        description: description.to_string(),
        month: "March".to_string(),
        year: "2023".to_string(),
        ticker: ticker.map(|s| s.to_string()),
        link: None,
        source: None,
    }
}

impl MockDirectory {
    pub fn new(companies: Vec<CompanyRecord>) -> Self {
        Self {
            companies,
            ..Default::default()
        }
    }

    /// `count` companies named `Company 01`, `Company 02`...
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|i| company(&format!("Company {i:02}"), "Numbered company", None))
                .collect(),
        )
    }

    pub fn with_finance(mut self, name: &str, finance: MockFinance) -> Self {
        self.finance.insert(name.to_string(), finance);
        self
    }

    pub fn delay_companies(&self, query: &str, delay: Duration) {
        if let Ok(mut delays) = self.companies_delays.lock() {
            delays.insert(query.to_string(), delay);
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn suggestion_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Suggestions(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn companies_calls(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Companies(query, page) => Some((query, page)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn find(&self, name: &str) -> Option<&CompanyRecord> {
        self.companies
            .iter()
            .find(|c| c.name.to_lowercase() == name.trim().to_lowercase())
    }
}

fn status_error(status: u16, request: &str, message: &str) -> IiError {
    IiError::HttpStatusError {
        status,
        request: request.to_string(),
        message: Some(message.to_string()),
    }
}

#[async_trait]
impl DirectoryApi for MockDirectory {
    async fn companies(&self, query: &str, page: u32, per_page: u32) -> IiResult<CompaniesPage> {
        self.record(MockCall::Companies(query.to_string(), page));

        let delay = self
            .companies_delays
            .lock()
            .ok()
            .and_then(|d| d.get(query).copied());
        if let Some(delay) = delay {
            sleep(delay).await;
        }

        if self.fail_companies.load(Ordering::SeqCst) {
            return Err(status_error(500, "/api/companies", "server error"));
        }

        let q = query.to_lowercase();
        let matched: Vec<_> = self
            .companies
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&q) || c.description.to_lowercase().contains(&q)
            })
            .cloned()
            .collect();

        let total = matched.len();
        let per_page = per_page.max(1) as usize;
        let start = (page.max(1) as usize - 1) * per_page;

        Ok(CompaniesPage {
            results: matched.into_iter().skip(start).take(per_page).collect(),
            pagination: Some(Pagination {
                page,
                pages: total.div_ceil(per_page) as u32,
                total: Some(total as u64),
                per_page: Some(per_page as u32),
            }),
        })
    }

    async fn suggestions(&self, text: &str) -> IiResult<Vec<String>> {
        self.record(MockCall::Suggestions(text.to_string()));

        if self.fail_suggestions.load(Ordering::SeqCst) {
            return Err(status_error(500, "/api/suggestions", "server error"));
        }

        let q = text.trim().to_lowercase();
        Ok(self
            .companies
            .iter()
            .map(|c| c.name.clone())
            .filter(|name| name.to_lowercase().contains(&q))
            .take(10)
            .collect())
    }

    async fn company(&self, name: &str) -> IiResult<CompanyRecord> {
        self.record(MockCall::Company(name.to_string()));

        self.find(name).cloned().ok_or_else(|| {
            status_error(
                404,
                &format!("/api/company/{name}"),
                &format!("Company '{name}' not found"),
            )
        })
    }

    async fn finance(&self, name: &str) -> IiResult<FinanceSnapshot> {
        self.record(MockCall::Finance(name.to_string()));

        match self.finance.get(name) {
            Some(MockFinance::Snapshot(snapshot)) => Ok(snapshot.clone()),
            Some(MockFinance::Status(status, message)) => Err(IiError::HttpStatusError {
                status: *status,
                request: format!("/api/company/{name}/finance"),
                message: message.clone(),
            }),
            None => Err(status_error(
                404,
                &format!("/api/company/{name}/finance"),
                "Company not found for finance data",
            )),
        }
    }
}
