//! Payloads exchanged with the company directory backend.
//!
//! The backend serializes spreadsheet rows, so fields arrive loosely typed:
//! numbers where text is expected, empty strings for missing values. Decoding
//! here normalizes all of that once.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::datetime::{date_from_millis, date_from_str, month_name};

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CompanyRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_month")]
    pub month: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub year: String,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub ticker: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub source: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CompaniesPage {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub results: Vec<CompanyRecord>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub pages: u32,

    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub per_page: Option<u32>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct StockPoint {
    #[serde(rename = "Date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,

    #[serde(rename = "Close")]
    pub close: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RevenuePoint {
    #[serde(rename = "Date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,

    #[serde(rename = "Revenue")]
    pub revenue: f64,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FinanceSnapshot {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub before_stock_data: Vec<StockPoint>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub after_stock_data: Vec<StockPoint>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub revenue_data: Vec<RevenuePoint>,

    #[serde(default, deserialize_with = "deserialize_trend")]
    pub before_trend: Trend,

    #[serde(default, deserialize_with = "deserialize_trend")]
    pub after_trend: Trend,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub error: Option<String>,

    #[serde(default)]
    pub errors: Option<FinanceErrors>,
}

/// Per-chart explanations attached to an otherwise usable snapshot.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FinanceErrors {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub revenue: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Trend {
    #[strum(to_string = "increase", serialize = "up")]
    Increase,

    #[strum(to_string = "decrease", serialize = "down")]
    Decrease,

    #[strum(to_string = "flat")]
    Flat,

    #[default]
    #[strum(to_string = "N/A")]
    NotAvailable,
}

impl CompanyRecord {
    /// `{month} {year}`, or whichever half is known.
    pub fn event_date(&self) -> String {
        format!("{} {}", self.month, self.year).trim().to_string()
    }
}

impl CompaniesPage {
    /// Current and total page, normalized so that `1 <= page <= pages`.
    pub fn page_bounds(&self) -> (u32, u32) {
        let pagination = self.pagination.unwrap_or_default();
        let pages = pagination.pages.max(1);
        let page = pagination.page.clamp(1, pages);

        (page, pages)
    }
}

impl FinanceSnapshot {
    pub fn revenue_error(&self) -> Option<&str> {
        self.errors.as_ref().and_then(|e| e.revenue.as_deref())
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = value_to_text(&value);
    Ok(if text.is_empty() { None } else { Some(text) })
}

fn deserialize_month<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = deserialize_text(deserializer)?;
    Ok(match u32::from_str(&text) {
        Ok(n) => month_name(n).map(str::to_string).unwrap_or(text),
        Err(_) => text,
    })
}

fn deserialize_trend<'de, D>(deserializer: D) -> Result<Trend, D::Error>
where
    D: Deserializer<'de>,
{
    let text = deserialize_text(deserializer)?;
    Ok(Trend::from_str(&text).unwrap_or_default())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => date_from_str(&s).map_err(serde::de::Error::custom),
        Value::Number(n) => match n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)) {
            Some(millis) => date_from_millis(millis).map_err(serde::de::Error::custom),
            None => Err(serde::de::Error::custom(format!("Invalid timestamp '{n}'"))),
        },
        other => Err(serde::de::Error::custom(format!("Invalid date '{other}'"))),
    }
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0) {
                format!("{f:.0}")
            } else {
                n.to_string()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => "".to_string(),
    }
}
