use async_trait::async_trait;

use crate::{
    error::IiResult,
    model::{CompaniesPage, CompanyRecord, FinanceSnapshot},
};

pub mod backend;

/// Read-only access to the company directory.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// One page of companies whose name or description matches `query`; an empty query matches all.
    async fn companies(&self, query: &str, page: u32, per_page: u32) -> IiResult<CompaniesPage>;

    /// Name completions for `text`; a blank text yields the backend's default set.
    async fn suggestions(&self, text: &str) -> IiResult<Vec<String>>;

    async fn company(&self, name: &str) -> IiResult<CompanyRecord>;

    async fn finance(&self, name: &str) -> IiResult<FinanceSnapshot>;
}

#[cfg(test)]
pub(crate) mod mock;
