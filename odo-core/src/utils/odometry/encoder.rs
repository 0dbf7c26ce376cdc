//! Wheel encoder edge counting for the odometry front end.
//!
//! Two `TickCell` accumulators are the only state shared between the
//! interrupt domain and the main loop. The producer side is a single atomic
//! increment per detected edge; the consumer side reads and zeroes both
//! cells inside one interrupt-suppressed window so no edge is ever lost or
//! double-counted across a drain.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use embedded_hal_async::digital::Wait;

/// Accumulator for the left wheel. Incremented only from the left edge source.
pub static LEFT_TICKS: TickCell = TickCell::new();
/// Accumulator for the right wheel. Incremented only from the right edge source.
pub static RIGHT_TICKS: TickCell = TickCell::new();

static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Single-producer/single-consumer tick accumulator.
///
/// The producer (interrupt context) only ever calls [`TickCell::increment`];
/// the consumer only ever drains it through [`WheelEncoders::drain_and_reset`].
/// An `i32` holds several minutes of ticks at maximum wheel speed, far beyond
/// the single scheduler period it has to survive between drains.
pub struct TickCell(AtomicI32);

impl TickCell {
    pub const fn new() -> Self {
        TickCell(AtomicI32::new(0))
    }

    /// Record one detected edge.
    ///
    /// This is the whole interrupt handler body: one relaxed add, no
    /// branching, no I/O. Safe to nest if a second edge preempts it.
    #[inline(always)]
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Read and zero the accumulator in one atomic exchange.
    ///
    /// Called with interrupts suppressed; the exchange also stays lossless
    /// against producers outside the critical section, such as a threaded
    /// host harness.
    fn read_and_clear(&self) -> i32 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

impl Default for TickCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle driving one wheel's accumulator from its sensor pin.
pub struct EdgeCounter {
    ticks: &'static TickCell,
}

impl EdgeCounter {
    pub const fn new(ticks: &'static TickCell) -> Self {
        EdgeCounter { ticks }
    }

    /// Count every electrical transition on `pin`, forever.
    ///
    /// The pin must already be configured as a pulled-up input so the line
    /// idles high. Each rising or falling edge adds exactly one tick. On
    /// targets with true GPIO interrupts the handler can instead call
    /// [`TickCell::increment`] on [`LEFT_TICKS`]/[`RIGHT_TICKS`] directly.
    ///
    /// No debouncing: signal bounce inflates the count and is accepted as a
    /// limit of the sensing hardware.
    pub async fn run<P: Wait>(
        self,
        mut pin: P,
    ) -> ! {
        loop {
            if pin.wait_for_any_edge().await.is_ok() {
                self.ticks.increment();
            }
        }
    }
}

/// Consumer handle over both wheel accumulators.
pub struct WheelEncoders {
    left: &'static TickCell,
    right: &'static TickCell,
}

impl WheelEncoders {
    pub const fn new(
        left: &'static TickCell,
        right: &'static TickCell,
    ) -> Self {
        WheelEncoders { left, right }
    }

    /// Return `(left, right)` tick counts and reset both to zero, as one
    /// indivisible action.
    ///
    /// The critical section masks the interrupt domain for the whole
    /// read-and-zero of both cells, so an edge arriving while it is open is
    /// delivered entirely before or entirely after the drain. The window is
    /// pure register/memory access; it stalls tick detection for its
    /// duration, so it carries no computation.
    pub fn drain_and_reset(&self) -> (i32, i32) {
        critical_section::with(|_| (self.left.read_and_clear(), self.right.read_and_clear()))
    }
}

/// Claim the global wheel encoders, once.
///
/// The first call returns the left/right producer handles and the consumer
/// handle; every later call is a safe no-op returning `None`. Call during
/// startup, before any edges are expected.
pub fn configure() -> Option<(EdgeCounter, EdgeCounter, WheelEncoders)> {
    if CONFIGURED.swap(true, Ordering::AcqRel) {
        tracing::warn!("wheel encoders already configured, ignoring");
        return None;
    }
    Some((
        EdgeCounter::new(&LEFT_TICKS),
        EdgeCounter::new(&RIGHT_TICKS),
        WheelEncoders::new(&LEFT_TICKS, &RIGHT_TICKS),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_exact_counts() {
        static LEFT: TickCell = TickCell::new();
        static RIGHT: TickCell = TickCell::new();
        let encoders = WheelEncoders::new(&LEFT, &RIGHT);

        for _ in 0..5 {
            LEFT.increment();
        }
        for _ in 0..7 {
            RIGHT.increment();
        }
        assert_eq!(encoders.drain_and_reset(), (5, 7));
    }

    #[test]
    fn second_drain_is_zero() {
        static LEFT: TickCell = TickCell::new();
        static RIGHT: TickCell = TickCell::new();
        let encoders = WheelEncoders::new(&LEFT, &RIGHT);

        LEFT.increment();
        RIGHT.increment();
        assert_eq!(encoders.drain_and_reset(), (1, 1));
        assert_eq!(encoders.drain_and_reset(), (0, 0));
    }

    #[test]
    fn edge_after_drain_lands_in_next_drain() {
        // An edge cannot interleave with the suppressed window, so it is
        // delivered either before the drain (counted now) or after it
        // (counted next time). Model both orderings.
        static LEFT: TickCell = TickCell::new();
        static RIGHT: TickCell = TickCell::new();
        let encoders = WheelEncoders::new(&LEFT, &RIGHT);

        LEFT.increment();
        assert_eq!(encoders.drain_and_reset(), (1, 0));
        LEFT.increment();
        assert_eq!(encoders.drain_and_reset(), (1, 0));
        assert_eq!(encoders.drain_and_reset(), (0, 0));
    }
}
