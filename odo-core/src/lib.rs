//! Encoder odometry front end for differential-drive robots on no-std embedded platforms.
//!
//! For a runnable host simulation, see the `odo-app/mock-mcu` crate.
#![no_std]

pub mod utils;
