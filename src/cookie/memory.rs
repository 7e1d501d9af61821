//! In-memory cookie jar
//!
//! Mimics how a browser applies `document.cookie` assignments: one entry per
//! name, dropped once an assignment carries an expiry in the past.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::CookieStore;
use crate::error::{DocketError, DocketResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    /// name -> still-encoded value
    entries: BTreeMap<String, String>,
    /// Every assignment, in order
    assignments: Vec<String>,
    clock: Option<DateTime<Utc>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar whose clock is pinned to `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            clock: Some(now),
            ..Self::default()
        }
    }

    /// Seed an entry with an already-encoded value
    pub fn with_entry(mut self, name: &str, encoded: &str) -> Self {
        self.entries.insert(name.to_string(), encoded.to_string());
        self
    }

    pub fn assignments(&self) -> &[String] {
        &self.assignments
    }

    fn is_expired(&self, cookie: &str) -> bool {
        let now = self.now();
        let mut expired = false;
        for attr in cookie.split(';').skip(1) {
            let attr = attr.trim();
            let (key, value) = attr.split_once('=').unwrap_or((attr, ""));
            if key.eq_ignore_ascii_case("expires") {
                if let Ok(at) = DateTime::parse_from_rfc2822(value) {
                    expired = at.with_timezone(&Utc) <= now;
                }
            } else if key.eq_ignore_ascii_case("max-age") {
                if let Ok(seconds) = value.parse::<i64>() {
                    // max-age wins over expires
                    return seconds <= 0;
                }
            }
        }
        expired
    }
}

impl CookieStore for MemoryCookieStore {
    fn raw(&self) -> DocketResult<String> {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        Ok(pairs.join("; "))
    }

    fn set_raw(&mut self, cookie: &str) -> DocketResult<()> {
        let pair = cookie.split(';').next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| DocketError::Cookie(format!("malformed assignment {:?}", cookie)))?;

        if self.is_expired(cookie) {
            self.entries.remove(name);
        } else {
            self.entries.insert(name.to_string(), value.to_string());
        }
        self.assignments.push(cookie.to_string());
        Ok(())
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }
}
