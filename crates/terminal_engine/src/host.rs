//! Host capabilities consumed by command actions: external navigation and wall-clock time.

use std::{cell::RefCell, rc::Rc};

use chrono::{DateTime, FixedOffset, Local};
use leptos::logging;

/// Host service for opening external URLs outside the terminal page.
///
/// Navigation is fire-and-forget: callers never observe whether the host honoured it.
pub trait Navigator {
    /// Requests that `url` be opened in a new browsing context.
    fn open_external(&self, url: &str);
}

/// Source of the current local date/time.
pub trait Clock {
    /// Returns the current local date/time.
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Navigator for hosts without a browsing context. Requests are only logged.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn open_external(&self, url: &str) {
        logging::warn!("external navigation unavailable, dropping `{url}`");
    }
}

#[derive(Debug, Default)]
/// In-memory navigator that records every requested URL.
pub struct MemoryNavigator {
    opened: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs requested so far, in request order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn open_external(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Clock backed by the host's local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

#[derive(Debug, Clone, Copy)]
/// Clock frozen at one instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Host capability bundle injected into a terminal session.
#[derive(Clone)]
pub struct HostServices {
    /// External navigation capability.
    pub navigator: Rc<dyn Navigator>,
    /// Wall-clock source for the `date` command and scrollback timestamps.
    pub clock: Rc<dyn Clock>,
}

impl HostServices {
    /// Bundles the supplied capabilities.
    pub fn new(navigator: Rc<dyn Navigator>, clock: Rc<dyn Clock>) -> Self {
        Self { navigator, clock }
    }

    /// Capabilities for non-browser hosts: logged navigation, system clock.
    pub fn headless() -> Self {
        Self::new(Rc::new(NoopNavigator), Rc::new(SystemClock))
    }

    /// Current time in unix milliseconds.
    pub fn unix_time_ms_now(&self) -> u64 {
        self.clock.now().timestamp_millis().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn memory_navigator_records_in_order() {
        let navigator = MemoryNavigator::new();
        navigator.open_external("https://a.example/");
        navigator.open_external("https://b.example/");
        assert_eq!(
            navigator.opened(),
            vec!["https://a.example/", "https://b.example/"]
        );
    }

    #[test]
    fn fixed_clock_drives_unix_millis() {
        let instant = FixedOffset::west_opt(3 * 3600)
            .expect("offset")
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("instant");
        let host = HostServices::new(Rc::new(NoopNavigator), Rc::new(FixedClock(instant)));
        assert_eq!(host.unix_time_ms_now(), 1_704_175_445_000);
    }
}
