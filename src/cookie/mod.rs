//! Cookie Store
//!
//! Serialization of `document.cookie` style strings behind a small trait,
//! so the widget can run against the real document or an in-memory jar.

mod document;
mod memory;

use chrono::{DateTime, TimeDelta, Utc};
use log::warn;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{DocketError, DocketResult};
use crate::items::{ItemList, SeenSet};

pub use document::DocumentCookieStore;
pub use memory::MemoryCookieStore;

/// Cookie holding the comma-joined seen identifiers
pub const HISTORY_COOKIE: &str = "docket-history";

/// Characters left alone by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ========================
// Options
// ========================

/// When a cookie stops being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Seconds from now; 0 leaves the cookie session-scoped, negative expires it
    In(i64),
    At(DateTime<Utc>),
}

impl Expiry {
    fn resolve(self, now: DateTime<Utc>) -> DocketResult<Option<DateTime<Utc>>> {
        match self {
            Expiry::In(0) => Ok(None),
            Expiry::In(seconds) => TimeDelta::try_seconds(seconds)
                .and_then(|delta| now.checked_add_signed(delta))
                .map(Some)
                .ok_or_else(|| {
                    DocketError::Cookie(format!("expiry of {}s is out of range", seconds))
                }),
            Expiry::At(at) => Ok(Some(at)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes appended after `name=value`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<Expiry>,
    pub max_age: Option<i64>,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn expires(mut self, expiry: Expiry) -> Self {
        self.expires = Some(expiry);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }
}

// ========================
// Encoding
// ========================

pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `None` when a `%` is not followed by two hex digits or the escapes do
/// not decode to UTF-8
pub fn decode_value(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|value| value.into_owned())
}

/// Date in the form produced by `Date.prototype.toUTCString`
pub fn to_utc_string(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build the string assigned to `document.cookie`
pub fn serialize_cookie(
    name: &str,
    value: &str,
    options: &CookieOptions,
    now: DateTime<Utc>,
) -> DocketResult<String> {
    if name.is_empty() || name.contains(['=', ';', ' ']) {
        return Err(DocketError::Cookie(format!("invalid cookie name {:?}", name)));
    }

    let mut cookie = format!("{}={}", name, encode_value(value));
    if let Some(path) = &options.path {
        cookie.push_str("; path=");
        cookie.push_str(path);
    }
    if let Some(domain) = &options.domain {
        cookie.push_str("; domain=");
        cookie.push_str(domain);
    }
    if let Some(expiry) = options.expires {
        if let Some(at) = expiry.resolve(now)? {
            cookie.push_str("; expires=");
            cookie.push_str(&to_utc_string(at));
        }
    }
    if let Some(max_age) = options.max_age {
        cookie.push_str(&format!("; max-age={}", max_age));
    }
    if options.secure {
        cookie.push_str("; secure");
    }
    if let Some(same_site) = options.same_site {
        cookie.push_str("; samesite=");
        cookie.push_str(same_site.as_str());
    }
    Ok(cookie)
}

/// Raw (still encoded) value of `name` in a `document.cookie` string
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .map(str::trim_start)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

// ========================
// Store
// ========================

/// Read/write access to a cookie jar
pub trait CookieStore {
    /// The whole jar as `a=1; b=2`
    fn raw(&self) -> DocketResult<String>;

    /// Assign one serialized cookie, like `document.cookie = ...`
    fn set_raw(&mut self, cookie: &str) -> DocketResult<()>;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn read(&self, name: &str) -> Option<String> {
        let cookies = match self.raw() {
            Ok(cookies) => cookies,
            Err(err) => {
                warn!("[docket] cannot read cookies: {}", err);
                return None;
            }
        };
        let raw = find_cookie(&cookies, name)?;
        let value = decode_value(raw);
        if value.is_none() {
            warn!("[docket] ignoring malformed cookie {}", name);
        }
        value
    }

    fn write(&mut self, name: &str, value: &str, options: &CookieOptions) -> DocketResult<()> {
        let cookie = serialize_cookie(name, value, options, self.now())?;
        self.set_raw(&cookie)
    }

    fn delete(&mut self, name: &str) -> DocketResult<()> {
        let options = CookieOptions::new().path("/").expires(Expiry::In(-1));
        self.write(name, "", &options)
    }
}

/// Seen set from the history cookie, empty when absent or unreadable
pub fn read_history<S: CookieStore + ?Sized>(store: &S) -> SeenSet {
    store
        .read(HISTORY_COOKIE)
        .map(|value| SeenSet::parse(&value))
        .unwrap_or_default()
}

/// Record every listed item as seen
pub fn write_history<S: CookieStore + ?Sized>(
    store: &mut S,
    items: &ItemList,
    expires_in: i64,
) -> DocketResult<()> {
    let options = CookieOptions::new().path("/").expires(Expiry::In(expires_in));
    store.write(HISTORY_COOKIE, &items.to_history(), &options)
}

/// Jar whose every access fails
#[cfg(test)]
pub(crate) struct FailingCookieStore;

#[cfg(test)]
impl CookieStore for FailingCookieStore {
    fn raw(&self) -> DocketResult<String> {
        Err(DocketError::Cookie("cookies disabled".to_string()))
    }

    fn set_raw(&mut self, _cookie: &str) -> DocketResult<()> {
        Err(DocketError::Cookie("cookies disabled".to_string()))
    }
}
