//! Native tick drivers
//!
//! Each cadence runs on its own thread and reaches the game only through a
//! [`SharedSession`], so every tick and input is applied under one lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::persistence::KeyValueStore;
use crate::platform::clock::Clock;
use crate::platform::session::SharedSession;
use crate::settings::Settings;

/// Calls a function at a fixed interval on a background thread until stopped
pub struct Ticker {
    name: &'static str,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(
        name: &'static str,
        interval: Duration,
        mut on_tick: impl FnMut() + Send + 'static,
    ) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    thread::sleep(interval);
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    on_tick();
                }
            })?;

        log::debug!("Ticker `{}` started every {:?}", name, interval);
        Ok(Self {
            name,
            stop,
            handle: Some(handle),
        })
    }

    /// Stop ticking and wait for the thread to finish its current tick
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Ticker `{}` panicked", self.name);
            }
            log::debug!("Ticker `{}` stopped", self.name);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The fast (movement/collision) and slow (descent) cadences of one session
pub struct GameLoop {
    fast: Ticker,
    slow: Ticker,
}

impl GameLoop {
    pub fn start<S, C>(session: &SharedSession<S, C>, settings: &Settings) -> std::io::Result<Self>
    where
        S: KeyValueStore + Send + 'static,
        C: Clock + Send + 'static,
    {
        let fast_session = session.clone();
        let fast = Ticker::spawn(
            "fast-tick",
            Duration::from_millis(settings.fast_tick_ms),
            move || {
                if let Err(e) = fast_session.advance_fast() {
                    log::error!("Failed to save high score: {}", e);
                }
            },
        )?;

        let slow_session = session.clone();
        let slow = Ticker::spawn(
            "slow-tick",
            Duration::from_millis(settings.slow_tick_ms),
            move || {
                if let Err(e) = slow_session.advance_slow() {
                    log::error!("Failed to save high score: {}", e);
                }
            },
        )?;

        Ok(Self { fast, slow })
    }

    pub fn stop(mut self) {
        self.fast.stop();
        self.slow.stop();
    }
}
