//! Board configuration for the odometry front end.
//!
//! All values here are fixed at startup and never change at runtime. The pin
//! numbers describe where the two wheel encoders are wired; the remaining
//! constants calibrate the publish pipeline.

/// GPIO pin carrying the left wheel encoder signal (pulled-up input).
pub const LEFT_ENCODER_PIN: u8 = 2;
/// GPIO pin carrying the right wheel encoder signal (pulled-up input).
pub const RIGHT_ENCODER_PIN: u8 = 3;

/// Rate at which odometry messages are published, in Hz.
pub const ENCODER_UPDATE_HZ: u64 = 10;

/// Linear distance travelled per encoder edge, in meters.
///
/// Calibrated for the stock wheels; counting both rising and falling edges
/// doubles the effective resolution of the encoder disc.
pub const DISTANCE_PER_TICK: f64 = 0.002;

/// Symmetric clamp applied to motor speed commands, as a fraction of full scale.
pub const MOTOR_SPEED_LIMIT: f64 = 0.8;
