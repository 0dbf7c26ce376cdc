//! Outbound message shapes for the host link.
//!
//! Both messages of a cycle carry the same [`Stamp`], sampled once when the
//! scheduler fires. The shapes are serialized as JSON the same way command
//! messages are elsewhere in the stack; the transport that frames and
//! delivers them is outside this crate.

use embassy_time::Instant;
use serde::Serialize;

/// Frame the velocity estimate is expressed in.
pub const ODOM_FRAME_ID: &str = "base_link";

/// Microseconds since boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stamp(pub u64);

impl From<Instant> for Stamp {
    fn from(instant: Instant) -> Self {
        Stamp(instant.as_micros())
    }
}

/// Net tick movement of each wheel since the previous cycle, sign-corrected
/// for direction of travel. Built fresh each cycle, immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderDelta {
    pub stamp: Stamp,
    pub left_delta: i32,
    pub right_delta: i32,
}

/// Linear velocity estimate derived from an [`EncoderDelta`].
///
/// `linear_x = ((left + right) / 2) * distance_per_tick * update_hz`.
/// The covariance is a fixed placeholder: entry 0 of the 6x6 row-major
/// matrix is 1, everything else is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VelocityEstimate {
    pub stamp: Stamp,
    pub frame_id: &'static str,
    pub linear_x: f64,
    #[serde(serialize_with = "serialize_covariance")]
    pub covariance: [f64; 36],
}

impl VelocityEstimate {
    pub fn new(
        stamp: Stamp,
        linear_x: f64,
    ) -> Self {
        let mut covariance = [0.0; 36];
        covariance[0] = 1.0;
        VelocityEstimate {
            stamp,
            frame_id: ODOM_FRAME_ID,
            linear_x,
            covariance,
        }
    }
}

// serde only derives array impls up to length 32.
fn serialize_covariance<S>(
    covariance: &[f64; 36],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeTuple;

    let mut tuple = serializer.serialize_tuple(covariance.len())?;
    for entry in covariance {
        tuple.serialize_element(entry)?;
    }
    tuple.end()
}

/// One message on the outbound odometry channel.
///
/// Serialized as JSON with tag `"mt"`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "mt", rename_all = "snake_case")]
pub enum OdometryMessage {
    /// Velocity estimate, published first in each cycle.
    Velocity(VelocityEstimate),
    /// Raw per-wheel deltas, published second.
    Delta(EncoderDelta),
}
