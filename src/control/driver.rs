//! Time sources and timestep drivers.
//!
//! The engine never owns a timer. It reads the current time from a [`Clock`] and
//! arms or disarms a [`TickDriver`]; whoever hosts the engine (a UI event loop, a
//! thread, or [`drive_simulated`] in tests) calls `tick` while the driver is armed.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::constants::{MAX_TICKS, TIME_STEP};

use super::engine::{FreefallEngine, TickOutcome};

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Simulated clock. Clones share the same time, so a test can keep one handle
/// and hand another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        ManualClock {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

pub trait TickDriver {
    fn arm(&mut self, interval_ms: u64);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Records the requested cadence; the host polls `is_armed` to decide whether to tick.
#[derive(Debug, Default, Clone)]
pub struct IntervalDriver {
    interval_ms: Option<u64>,
    arm_count: u32,
}

impl IntervalDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval_ms(&self) -> Option<u64> {
        self.interval_ms
    }

    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }
}

impl TickDriver for IntervalDriver {
    fn arm(&mut self, interval_ms: u64) {
        self.interval_ms = Some(interval_ms);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.interval_ms = None;
    }

    fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }
}

/// Pumps the engine on simulated time until the drop lands (which disarms the driver)
/// or `MAX_TICKS` is reached. Returns the number of ticks run.
pub fn drive_simulated(engine: &mut FreefallEngine<ManualClock, IntervalDriver>) -> usize {
    let mut ticks = 0;

    while ticks < MAX_TICKS {
        let Some(interval_ms) = engine.driver().interval_ms() else {
            break;
        };

        engine.clock().advance(interval_ms as f64);
        ticks += 1;

        if let TickOutcome::Landed(_) = engine.tick(TIME_STEP) {
            break;
        }
    }

    ticks
}
