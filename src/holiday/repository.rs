use std::sync::Arc;

use chrono::{DateTime, Duration, Months, SecondsFormat, Utc};
use reqwest::Url;
use thiserror::Error;

use super::record::{HolidayRecord, ListItemsResponse};
use super::transport::{HttpTransport, TransportError};

pub const DEFAULT_LIST_NAME: &str = "Company Holidays";

const SELECT_FIELDS: &str =
    "Id,Title,HolidayDate,HolidayType,HolidayTag,HolidayGraphic,Created,Modified";
const ORDER_BY: &str = "HolidayDate asc";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("invalid site URL {0:?}")]
    InvalidSiteUrl(String),
    #[error("could not build list endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("list API returned HTTP {0}")]
    Status(u16),
    #[error("malformed list response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The site hosting the list. Only used to derive the REST endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteContext {
    absolute_url: Url,
}

impl SiteContext {
    pub fn parse(url: &str) -> Result<Self, RepositoryError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(RepositoryError::InvalidSiteUrl(url.to_string()));
        }

        let absolute_url =
            Url::parse(trimmed).map_err(|_| RepositoryError::InvalidSiteUrl(url.to_string()))?;
        match absolute_url.scheme() {
            "http" | "https" if absolute_url.has_host() => Ok(Self { absolute_url }),
            _ => Err(RepositoryError::InvalidSiteUrl(url.to_string())),
        }
    }

    pub fn absolute_url(&self) -> &Url {
        &self.absolute_url
    }
}

/// Read-only access to the holiday list.
///
/// Every fetch fails soft: HTTP, transport and decode errors are logged and
/// surface as "no holidays".
pub struct HolidayRepository {
    site: SiteContext,
    list_name: String,
    transport: Arc<dyn HttpTransport>,
}

impl HolidayRepository {
    pub fn new(
        site: SiteContext,
        list_name: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, RepositoryError> {
        let repository = Self {
            site,
            list_name: list_name.to_string(),
            transport,
        };
        // Reject list names that cannot form an endpoint up front.
        repository.items_url(Utc::now(), Utc::now())?;
        Ok(repository)
    }

    pub fn items_url(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Url, RepositoryError> {
        let base = self.site.absolute_url().as_str().trim_end_matches('/');
        let endpoint = format!(
            "{}/_api/web/lists/getbytitle('{}')/items",
            base,
            escape_list_title(&self.list_name)
        );
        let mut url =
            Url::parse(&endpoint).map_err(|e| RepositoryError::InvalidEndpoint(e.to_string()))?;

        let filter = format!(
            "HolidayDate ge '{}' and HolidayDate le '{}'",
            iso_timestamp(window_start),
            iso_timestamp(window_end)
        );
        url.query_pairs_mut()
            .append_pair("$select", SELECT_FIELDS)
            .append_pair("$filter", &filter)
            .append_pair("$orderby", ORDER_BY);

        Ok(url)
    }

    /// Holidays dated within `[window_start, window_end]`, earliest first.
    pub async fn fetch_upcoming(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<HolidayRecord> {
        match self.try_fetch_upcoming(window_start, window_end).await {
            Ok(holidays) => {
                tracing::debug!(
                    list = %self.list_name,
                    count = holidays.len(),
                    "fetched upcoming holidays"
                );
                holidays
            }
            Err(e) => {
                tracing::error!(list = %self.list_name, "Error fetching holidays: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_next(&self) -> Option<HolidayRecord> {
        self.fetch_next_at(Utc::now()).await
    }

    pub async fn fetch_next_at(&self, now: DateTime<Utc>) -> Option<HolidayRecord> {
        let (start, end) = upcoming_window(now);
        self.fetch_upcoming(start, end).await.into_iter().next()
    }

    async fn try_fetch_upcoming(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<HolidayRecord>, RepositoryError> {
        let url = self.items_url(window_start, window_end)?;
        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(RepositoryError::Status(response.status));
        }

        let parsed: ListItemsResponse = serde_json::from_str(&response.body)?;
        let mut holidays = parsed.value;
        // Stable, so equal dates keep server order.
        holidays.sort_by_key(|h| h.holiday_date);
        Ok(holidays)
    }
}

/// `[now, now + 1 year]`. A Feb 29 start clamps to Feb 28.
pub fn upcoming_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = now
        .checked_add_months(Months::new(12))
        .unwrap_or_else(|| now + Duration::days(365));
    (now, end)
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// OData string literals double embedded quotes; `%`, `#` and `?` would
/// otherwise end the path early.
fn escape_list_title(title: &str) -> String {
    let mut escaped = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            '\'' => escaped.push_str("''"),
            '%' => escaped.push_str("%25"),
            '#' => escaped.push_str("%23"),
            '?' => escaped.push_str("%3F"),
            _ => escaped.push(c),
        }
    }
    escaped
}
