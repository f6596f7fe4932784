use std::borrow::Cow;

use rust_decimal::Decimal;
use tracing::{debug, warn};
use url::{Url, form_urlencoded};

use super::normalize::parse_amount;

const SALARY_PARAM: &str = "sal";

/// First `sal` value among decoded query pairs.
fn first_salary_value<'a, I>(mut pairs: I) -> Option<String>
where
    I: Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
{
    pairs
        .find(|(key, _)| key == SALARY_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Reads the initial salary from the `sal` query parameter.
///
/// Accepts a bare query (`sal=5000`), one with a leading `?`, or a full URL
/// (`https://host/?sal=5000#top`). Returns `None` when the parameter is
/// absent or its value is blank; otherwise the value goes through
/// [`parse_amount`], so malformed values become zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use cost_core::input::salary_from_query;
///
/// assert_eq!(salary_from_query("?sal=7500"), Some(dec!(7500)));
/// assert_eq!(salary_from_query("https://example.com/?tab=2&sal=3.200,50"), Some(dec!(3200.50)));
/// assert_eq!(salary_from_query("?tab=2"), None);
/// ```
pub fn salary_from_query(query: &str) -> Option<Decimal> {
    let raw = match Url::parse(query) {
        Ok(url) => first_salary_value(url.query_pairs()),
        Err(_) => {
            let bare = query.split_once('?').map_or(query, |(_, rest)| rest);
            let bare = bare.split('#').next().unwrap_or_default();
            first_salary_value(form_urlencoded::parse(bare.as_bytes()))
        }
    }?;

    if raw.trim().is_empty() {
        warn!(query = %query, "'{}' query parameter is blank; ignoring", SALARY_PARAM);
        return None;
    }

    let salary = parse_amount(&raw);
    debug!(raw = %raw, salary = %salary, "initial salary read from query string");
    Some(salary)
}
