//! The publish cycle: drain, convert, stamp, publish.
//!
//! [`OdometryCycle`] runs only in the main-loop domain. Each time the rate
//! scheduler fires it drains both wheel accumulators inside one critical
//! section, converts the deltas to a linear velocity, and hands two messages
//! with a shared stamp to the injected publisher.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Instant;

use super::encoder::WheelEncoders;
use super::messages::{EncoderDelta, OdometryMessage, Stamp, VelocityEstimate};
use super::scheduler::RateScheduler;

/// Channel carrying outbound odometry messages to the transport task.
pub static ODOMETRY_CHANNEL: Channel<CriticalSectionRawMutex, OdometryMessage, 16> = Channel::new();

/// Outbound capability the cycle publishes into.
///
/// Fire-and-forget: the cycle never observes delivery success or failure and
/// never retries.
pub trait OdometryPublisher {
    fn publish_velocity(&mut self, msg: VelocityEstimate);
    fn publish_delta(&mut self, msg: EncoderDelta);
}

/// Publisher backed by [`ODOMETRY_CHANNEL`].
///
/// Never blocks the cycle: when the transport task lags and the channel is
/// full, the message is dropped with a warning.
pub struct ChannelPublisher;

impl OdometryPublisher for ChannelPublisher {
    fn publish_velocity(&mut self, msg: VelocityEstimate) {
        if ODOMETRY_CHANNEL.try_send(OdometryMessage::Velocity(msg)).is_err() {
            tracing::warn!("odometry channel full, dropping velocity message");
        }
    }

    fn publish_delta(&mut self, msg: EncoderDelta) {
        if ODOMETRY_CHANNEL.try_send(OdometryMessage::Delta(msg)).is_err() {
            tracing::warn!("odometry channel full, dropping delta message");
        }
    }
}

/// Orchestrates one publish cycle per scheduler period.
pub struct OdometryCycle<P> {
    encoders: WheelEncoders,
    scheduler: RateScheduler,
    distance_per_tick: f64,
    update_hz: f64,
    publisher: P,
}

impl<P: OdometryPublisher> OdometryCycle<P> {
    /// Build a cycle publishing at `update_hz`, with deadlines anchored at `now`.
    pub fn new(
        encoders: WheelEncoders,
        update_hz: u64,
        distance_per_tick: f64,
        publisher: P,
        now: Instant,
    ) -> Self {
        OdometryCycle {
            encoders,
            scheduler: RateScheduler::from_hz(update_hz, now),
            distance_per_tick,
            update_hz: update_hz as f64,
            publisher,
        }
    }

    /// Poll from the main loop. Runs one cycle to completion when due,
    /// otherwise returns immediately.
    ///
    /// `reverse` is read once per cycle from the motion-command source; when
    /// set, both deltas are negated before any further use. This assumes both
    /// wheels share the direction of travel, which holds only for straight
    /// motion: a deliberate simplification, not a turning-aware correction.
    pub fn update(
        &mut self,
        now: Instant,
        reverse: bool,
    ) {
        if !self.scheduler.needs_run(now) {
            return;
        }

        let (mut left_delta, mut right_delta) = self.encoders.drain_and_reset();

        if reverse {
            left_delta = -left_delta;
            right_delta = -right_delta;
        }

        // One instant, reused: both messages of a cycle carry the same stamp.
        let stamp = Stamp::from(now);

        let avg_ticks = (f64::from(left_delta) + f64::from(right_delta)) / 2.0;
        let linear_x = avg_ticks * self.distance_per_tick * self.update_hz;

        let velocity = VelocityEstimate::new(stamp, linear_x);
        let delta = EncoderDelta {
            stamp,
            left_delta,
            right_delta,
        };

        // Velocity first, then the raw deltas. Downstream consumers rely on
        // this ordering.
        self.publisher.publish_velocity(velocity);
        self.publisher.publish_delta(delta);

        tracing::trace!(left_delta, right_delta, linear_x, "odometry cycle published");
    }

    /// Tear the cycle down, handing the publisher back to the caller.
    pub fn into_publisher(self) -> P {
        self.publisher
    }
}
