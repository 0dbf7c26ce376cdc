//! Module Exports
//!
//! This file exports the odometry pipeline, leaves first.
//!
//! - `encoder`: interrupt-driven tick accumulators and the atomic drain
//! - `scheduler`: fixed-rate gate polled from the main loop
//! - `messages`: outbound message shapes shared with the host
//! - `cycle`: orchestration of one publish cycle

pub mod cycle;
pub mod encoder;
pub mod messages;
pub mod scheduler;

pub use cycle::{OdometryCycle, OdometryPublisher, ODOMETRY_CHANNEL};
pub use encoder::{EdgeCounter, TickCell, WheelEncoders};
pub use messages::{EncoderDelta, OdometryMessage, Stamp, VelocityEstimate};
pub use scheduler::RateScheduler;
