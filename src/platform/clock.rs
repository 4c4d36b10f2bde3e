//! Wall-clock time for score timestamps

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of "now" plus the display format used on the leaderboard
pub trait Clock {
    /// Unix time in milliseconds
    fn now_millis(&self) -> u64;

    /// Human-readable date for a Unix millisecond timestamp
    fn format_date(&self, millis: u64) -> String {
        format_utc(millis)
    }
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    /// Browser locale formatting
    fn format_date(&self, millis: u64) -> String {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(millis as f64));
        String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
    }
}

/// Settable clock for tests and replays; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// `YYYY-MM-DD HH:MM:SS UTC`
pub fn format_utc(millis: u64) -> String {
    let secs = millis / 1000;
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Proleptic Gregorian date for a day count since 1970-01-01
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_utc(0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_format_known_dates() {
        // 2000-02-29 12:34:56 UTC
        assert_eq!(format_utc(951_827_696_000), "2000-02-29 12:34:56 UTC");
        // 2024-12-31 23:59:59 UTC
        assert_eq!(format_utc(1_735_689_599_000), "2024-12-31 23:59:59 UTC");
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let view = clock.clone();
        clock.advance(500);
        assert_eq!(view.now_millis(), 1_500);
        view.set(42);
        assert_eq!(clock.now_millis(), 42);
    }
}
