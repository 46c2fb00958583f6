//! Query-string parsing for the payment listing endpoint.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use payments_types::{AppError, GetPaymentsPagedRequest};

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
/// Window used when `startDate` is omitted.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Raw `GET /api/payments` parameters.
///
/// Everything is taken as text so malformed values produce our own JSON
/// error body rather than the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD`, which means midnight UTC.
///
/// The same holds for `endDate`: `endDate=2025-01-31` stops at
/// 2025-01-31T00:00:00Z inclusive.
fn parse_bound(name: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!(
            "{} must be an RFC 3339 timestamp or YYYY-MM-DD date",
            name
        ))
    })?;

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

fn parse_page_param(name: &str, raw: Option<&str>, default: u32) -> Result<u32, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("{} must be a positive integer", name))),
    }
}

impl ListPaymentsQuery {
    /// Applies defaults and validation, relative to `now`.
    pub fn into_request(self, now: DateTime<Utc>) -> Result<GetPaymentsPagedRequest, AppError> {
        let page_number =
            parse_page_param("pageNumber", self.page_number.as_deref(), DEFAULT_PAGE_NUMBER)?;
        if page_number < 1 {
            return Err(AppError::BadRequest("pageNumber must be at least 1".into()));
        }

        let page_size = parse_page_param("pageSize", self.page_size.as_deref(), DEFAULT_PAGE_SIZE)?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::BadRequest(format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let end_date = match self.end_date.as_deref() {
            Some(raw) => parse_bound("endDate", raw)?,
            None => now,
        };
        let start_date = match self.start_date.as_deref() {
            Some(raw) => parse_bound("startDate", raw)?,
            None => now - Duration::days(DEFAULT_LOOKBACK_DAYS),
        };

        if start_date > end_date {
            return Err(AppError::BadRequest(
                "startDate must not be after endDate".into(),
            ));
        }

        Ok(GetPaymentsPagedRequest {
            start_date,
            end_date,
            page_number,
            page_size,
        })
    }
}
