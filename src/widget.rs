//! Widget Controller
//!
//! Reads the host's item list, counts what the visitor has not seen, shows
//! the badge, and records history when the target page is reached.

use log::{debug, info, warn};

use crate::badge::{ensure_stylesheet, Badge};
use crate::config::DocketConfig;
use crate::cookie::{read_history, write_history, CookieStore};
use crate::error::{DocketError, DocketResult};
use crate::items::ItemList;
use crate::location::matches_target;
use crate::page::Page;
use crate::schedule::RemovalTask;

/// Lifecycle of one widget within a page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocketState {
    Uninitialized,
    /// Host has no item list
    Inert,
    Counting,
    /// Everything already seen
    Hidden,
    Shown,
    Removed,
}

impl DocketState {
    pub fn as_str(self) -> &'static str {
        match self {
            DocketState::Uninitialized => "uninitialized",
            DocketState::Inert => "inert",
            DocketState::Counting => "counting",
            DocketState::Hidden => "hidden",
            DocketState::Shown => "shown",
            DocketState::Removed => "removed",
        }
    }
}

pub struct Docket<P: Page, C: CookieStore> {
    config: DocketConfig,
    page: P,
    cookies: C,
    host: P::Node,
    items: Option<ItemList>,
    unseen: usize,
    badge: Option<Badge<P::Node>>,
    pending: Option<RemovalTask>,
    state: DocketState,
}

impl<P: Page, C: CookieStore> Docket<P, C> {
    /// Validate `config` and resolve the host element
    pub fn new(config: DocketConfig, page: P, cookies: C) -> DocketResult<Self> {
        config.validate()?;
        let host = page.query(&config.target)?.ok_or_else(|| {
            DocketError::Configuration(format!("target element {:?} not found", config.target))
        })?;
        if let Some(selector) = &config.target_item {
            debug!("[docket] targetItem {:?} is reserved and has no effect", selector);
        }

        Ok(Self {
            config,
            page,
            cookies,
            host,
            items: None,
            unseen: 0,
            badge: None,
            pending: None,
            state: DocketState::Uninitialized,
        })
    }

    /// Count unseen items, render the badge and record history. Runs once;
    /// later calls return the current state. A failed history write is
    /// logged and does not undo the badge.
    pub fn initialize(&mut self) -> DocketResult<DocketState> {
        if self.state != DocketState::Uninitialized {
            return Ok(self.state);
        }

        let raw = self.page.attribute(&self.host, &self.config.attribute);
        let Some(items) = raw.as_deref().and_then(ItemList::parse) else {
            debug!("[docket] host has no {} attribute, staying inert", self.config.attribute);
            self.state = DocketState::Inert;
            return Ok(self.state);
        };

        self.state = DocketState::Counting;
        let reached = self.target_page_reached()?;
        let seen = read_history(&self.cookies);
        self.unseen = items.unseen_count(&seen);
        debug!("[docket] {} of {} items unseen", self.unseen, items.len());

        if self.unseen > 0 {
            ensure_stylesheet(&self.page)?;
            let badge = Badge::render(
                &self.page,
                &self.host,
                self.config.position,
                self.config.margin,
                self.unseen,
            )?;
            self.badge = Some(badge);
            self.state = DocketState::Shown;
        } else {
            self.state = DocketState::Hidden;
        }

        if reached {
            match write_history(&mut self.cookies, &items, self.config.expires) {
                Ok(()) => info!("[docket] target page reached, {} items marked seen", items.len()),
                Err(err) => warn!("[docket] could not record history: {}", err),
            }
            if self.badge.is_some() {
                self.pending = Some(RemovalTask::default());
            }
        }

        self.items = Some(items);
        Ok(self.state)
    }

    /// Apply the removal state to the badge. Returns false when there is no
    /// badge to remove.
    pub fn remove(&mut self) -> DocketResult<bool> {
        self.pending = None;
        let Some(badge) = self.badge.take() else {
            return Ok(false);
        };
        badge.dispose(&self.page)?;
        self.state = DocketState::Removed;
        debug!("[docket] badge removed");
        Ok(true)
    }

    /// Forget a scheduled removal. Returns whether one was pending.
    pub fn cancel_removal(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn target_page_reached(&self) -> DocketResult<bool> {
        match &self.config.target_page {
            Some(target) => Ok(matches_target(&self.page.current_path()?, target)),
            None => Ok(false),
        }
    }

    pub fn state(&self) -> DocketState {
        self.state
    }

    pub fn unseen_count(&self) -> usize {
        self.unseen
    }

    pub fn items(&self) -> Option<&ItemList> {
        self.items.as_ref()
    }

    /// Removal waiting to be scheduled by the caller
    pub fn pending_removal(&self) -> Option<RemovalTask> {
        self.pending
    }

    pub fn badge(&self) -> Option<&Badge<P::Node>> {
        self.badge.as_ref()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn cookies(&self) -> &C {
        &self.cookies
    }

    pub fn into_cookies(self) -> C {
        self.cookies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Margin, Position};
    use crate::cookie::{FailingCookieStore, MemoryCookieStore, HISTORY_COOKIE};
    use crate::page::fake::FakePage;
    use crate::styles::REMOVED_CLASS;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    const HOST: usize = 0;

    fn jar() -> MemoryCookieStore {
        MemoryCookieStore::at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    fn page_with_posts(path: &str, posts: &str) -> FakePage {
        FakePage::at(path).with_host("#news", &[("data-posts", posts)])
    }

    fn docket<C: CookieStore>(
        page: FakePage,
        cookies: C,
        config: DocketConfig,
    ) -> Docket<FakePage, C> {
        Docket::new(config, page, cookies).expect("valid config")
    }

    #[test]
    fn test_missing_target_is_configuration_error() {
        let page = page_with_posts("/", "1");
        let result = Docket::new(DocketConfig::new(""), page, jar());
        assert!(matches!(result, Err(DocketError::Configuration(_))));
    }

    #[test]
    fn test_unresolved_target_is_configuration_error() {
        let page = page_with_posts("/", "1");
        let result = Docket::new(DocketConfig::new("#missing"), page, jar());
        assert!(matches!(result, Err(DocketError::Configuration(_))));
    }

    #[test]
    fn test_invalid_selector_is_configuration_error() {
        let page = page_with_posts("/", "1");
        let result = Docket::new(DocketConfig::new("[[x"), page, jar());
        assert!(matches!(result, Err(DocketError::Configuration(_))));
    }

    #[test]
    fn test_shows_all_when_nothing_seen() {
        let page = page_with_posts("/", "1001,1002,1003");
        let mut docket = docket(page, jar(), DocketConfig::new("#news"));
        assert_eq!(docket.initialize().unwrap(), DocketState::Shown);

        let badges = docket.page().children(HOST);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].text, "3");
        assert_eq!(badges[0].class, "docket-pin right-top");
        assert_eq!(docket.page().style_count(), 1);
        assert!(docket.cookies().assignments().is_empty());
        assert_eq!(docket.pending_removal(), None);
    }

    #[test]
    fn test_counts_only_unseen() {
        let cookies = jar().with_entry(HISTORY_COOKIE, "1001%2C1002");
        let page = page_with_posts("/", "1001,1002,1003");
        let mut docket = docket(page, cookies, DocketConfig::new("#news"));
        docket.initialize().unwrap();

        assert_eq!(docket.unseen_count(), 1);
        assert_eq!(docket.page().children(HOST)[0].text, "1");
    }

    #[test]
    fn test_absent_attribute_is_inert() {
        let page = FakePage::at("/news").with_host("#news", &[]);
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        let mut docket = docket(page, jar(), config);

        assert_eq!(docket.initialize().unwrap(), DocketState::Inert);
        assert_eq!(docket.page().style_count(), 0);
        assert!(docket.page().children(HOST).is_empty());
        assert!(docket.cookies().assignments().is_empty());
        assert!(docket.items().is_none());
    }

    #[test]
    fn test_empty_attribute_is_inert() {
        let mut docket = docket(page_with_posts("/", " , "), jar(), DocketConfig::new("#news"));
        assert_eq!(docket.initialize().unwrap(), DocketState::Inert);
        assert_eq!(docket.page().style_count(), 0);
    }

    #[test]
    fn test_target_page_records_history_and_schedules_removal() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        let mut docket = docket(page_with_posts("/news/", "1001,1002,1003"), jar(), config);

        assert_eq!(docket.initialize().unwrap(), DocketState::Shown);
        assert_eq!(
            docket.cookies().assignments(),
            ["docket-history=1001%2C1002%2C1003; path=/".to_string()]
        );
        assert_eq!(
            docket.pending_removal(),
            Some(RemovalTask { delay: Duration::from_millis(500) })
        );

        let node = *docket.badge().unwrap().node();
        assert!(docket.remove().unwrap());
        assert_eq!(docket.state(), DocketState::Removed);
        assert!(docket.page().element(node).has_class(REMOVED_CLASS));
        assert_eq!(docket.pending_removal(), None);

        // terminal
        assert!(!docket.remove().unwrap());
        assert_eq!(docket.state(), DocketState::Removed);
    }

    #[test]
    fn test_other_page_leaves_history_alone() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        let mut docket = docket(page_with_posts("/about", "1001"), jar(), config);

        docket.initialize().unwrap();
        assert!(docket.cookies().assignments().is_empty());
        assert_eq!(docket.pending_removal(), None);
    }

    #[test]
    fn test_history_uses_configured_expiry() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("news".to_string());
        config.expires = 86_400;
        let mut docket = docket(page_with_posts("/news", "7"), jar(), config);

        docket.initialize().unwrap();
        assert_eq!(
            docket.cookies().assignments(),
            ["docket-history=7; path=/; expires=Sat, 02 Mar 2024 12:00:00 GMT".to_string()]
        );
    }

    #[test]
    fn test_second_page_load_sees_nothing_new() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        let mut first = docket(page_with_posts("/news", "1001,1002,1003"), jar(), config.clone());
        first.initialize().unwrap();
        let cookies = first.into_cookies();

        let mut second = docket(page_with_posts("/", "1001,1002,1003"), cookies, config);
        assert_eq!(second.initialize().unwrap(), DocketState::Hidden);
        assert_eq!(second.unseen_count(), 0);
        assert!(second.page().children(HOST).is_empty());
        assert_eq!(second.page().style_count(), 0);
    }

    #[test]
    fn test_initialize_runs_once() {
        let mut docket = docket(page_with_posts("/", "1,2"), jar(), DocketConfig::new("#news"));
        docket.initialize().unwrap();
        assert_eq!(docket.initialize().unwrap(), DocketState::Shown);
        assert_eq!(docket.page().children(HOST).len(), 1);
    }

    #[test]
    fn test_hidden_on_target_page_records_without_removal() {
        let cookies = jar().with_entry(HISTORY_COOKIE, "1");
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/".to_string());
        let mut docket = docket(page_with_posts("/", "1"), cookies, config);

        assert_eq!(docket.initialize().unwrap(), DocketState::Hidden);
        assert_eq!(docket.cookies().assignments().len(), 1);
        assert_eq!(docket.pending_removal(), None);
    }

    #[test]
    fn test_position_and_margin_applied() {
        let mut config = DocketConfig::new("#news");
        config.position = Position::RightBottom;
        config.margin = Margin { x: 5, y: 8 };
        let mut docket = docket(page_with_posts("/", "1"), jar(), config);

        docket.initialize().unwrap();
        let badge = &docket.page().children(HOST)[0];
        assert_eq!(badge.class, "docket-pin right-bottom");
        assert_eq!(badge.style, "right: 5px; bottom: 8px;");
    }

    #[test]
    fn test_custom_items_attribute() {
        let page = FakePage::at("/").with_host("#news", &[("data-stamps", "1,2")]);
        let mut config = DocketConfig::new("#news");
        config.attribute = "data-stamps".to_string();
        let mut docket = docket(page, jar(), config);

        docket.initialize().unwrap();
        assert_eq!(docket.unseen_count(), 2);
    }

    #[test]
    fn test_malformed_history_counts_everything() {
        let cookies = jar().with_entry(HISTORY_COOKIE, "%FF");
        let mut docket = docket(page_with_posts("/", "1,2"), cookies, DocketConfig::new("#news"));
        docket.initialize().unwrap();
        assert_eq!(docket.unseen_count(), 2);
    }

    #[test]
    fn test_unreadable_cookies_count_everything() {
        let page = page_with_posts("/", "1,2");
        let mut docket = docket(page, FailingCookieStore, DocketConfig::new("#news"));
        assert_eq!(docket.initialize().unwrap(), DocketState::Shown);
        assert_eq!(docket.unseen_count(), 2);
        assert_eq!(docket.page().children(HOST)[0].text, "2");
    }

    #[test]
    fn test_failed_history_write_keeps_widget_consistent() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        let mut docket = docket(page_with_posts("/news", "1,2"), FailingCookieStore, config);

        assert_eq!(docket.initialize().unwrap(), DocketState::Shown);
        assert_eq!(docket.page().children(HOST).len(), 1);
        assert_eq!(docket.pending_removal(), Some(RemovalTask::default()));
        assert!(docket.remove().unwrap());
        assert_eq!(docket.state(), DocketState::Removed);
    }

    #[test]
    fn test_out_of_range_expiry_rejected_at_construction() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        config.expires = 10_000_000_000_000;
        let result = Docket::new(config, page_with_posts("/news", "1,2,3"), jar());
        assert!(matches!(result, Err(DocketError::Configuration(_))));
    }

    #[test]
    fn test_cancel_removal() {
        let mut config = DocketConfig::new("#news");
        config.target_page = Some("/news".to_string());
        let mut docket = docket(page_with_posts("/news", "1"), jar(), config);
        docket.initialize().unwrap();

        assert!(docket.cancel_removal());
        assert!(!docket.cancel_removal());
        assert_eq!(docket.pending_removal(), None);
        assert_eq!(docket.state(), DocketState::Shown);
    }
}
