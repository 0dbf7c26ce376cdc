use clap::Parser;
use core::convert::Infallible;
use embassy_executor::{Executor, Spawner};
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::digital::Wait;
use odo_core::mk_static;
use odo_core::utils::config;
use odo_core::utils::odometry::cycle::{ChannelPublisher, OdometryCycle, ODOMETRY_CHANNEL};
use odo_core::utils::odometry::encoder::{self, EdgeCounter};
use tracing::{error, info};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts
{
    /// odometry publish rate in Hz
    #[clap(long, default_value_t = config::ENCODER_UPDATE_HZ)]
    hz: u64,
    /// meters of travel per encoder edge
    #[clap(long, default_value_t = config::DISTANCE_PER_TICK)]
    distance_per_tick: f64,
    /// simulated left wheel edge rate in Hz
    #[clap(long, default_value_t = 200)]
    left_edge_hz: u64,
    /// simulated right wheel edge rate in Hz
    #[clap(long, default_value_t = 200)]
    right_edge_hz: u64,
    /// treat the platform as commanded in reverse
    #[clap(long)]
    reverse: bool,
}

/// Encoder input stand-in whose line "transitions" at a fixed rate.
struct SimEncoderPin {
    interval: Duration,
}

impl embedded_hal::digital::ErrorType for SimEncoderPin {
    type Error = Infallible;
}

impl Wait for SimEncoderPin {
    async fn wait_for_high(&mut self) -> Result<(), Infallible> {
        self.wait_for_any_edge().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Infallible> {
        self.wait_for_any_edge().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
        self.wait_for_any_edge().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
        self.wait_for_any_edge().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
        Timer::after(self.interval).await;
        Ok(())
    }
}

#[embassy_executor::task(pool_size = 2)]
async fn edge_task(counter: EdgeCounter, edge_hz: u64) -> ! {
    let pin = SimEncoderPin {
        interval: Duration::from_hz(edge_hz),
    };
    counter.run(pin).await
}

#[embassy_executor::task]
async fn odometry_task(mut cycle: OdometryCycle<ChannelPublisher>, reverse: bool) -> ! {
    loop {
        cycle.update(Instant::now(), reverse);
        Timer::after_millis(1).await;
    }
}

#[embassy_executor::task]
async fn telemetry_task() -> ! {
    loop {
        let msg = ODOMETRY_CHANNEL.receive().await;
        match serde_json::to_string(&msg) {
            Ok(json) => info!("{json}"),
            Err(e) => error!("failed to serialize odometry message: {e}"),
        }
    }
}

#[embassy_executor::task]
async fn main_task(spawner: Spawner) {
    let opts: Opts = Opts::parse();

    let (left, right, encoders) = encoder::configure().expect("wheel encoders configured twice");
    spawner.spawn(edge_task(left, opts.left_edge_hz)).unwrap();
    spawner.spawn(edge_task(right, opts.right_edge_hz)).unwrap();

    let cycle = OdometryCycle::new(
        encoders,
        opts.hz,
        opts.distance_per_tick,
        ChannelPublisher,
        Instant::now(),
    );
    spawner.spawn(odometry_task(cycle, opts.reverse)).unwrap();
    spawner.spawn(telemetry_task()).unwrap();

    info!(
        "publishing odometry at {} Hz (left wheel {} Hz, right wheel {} Hz, reverse: {})",
        opts.hz, opts.left_edge_hz, opts.right_edge_hz, opts.reverse
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let executor = mk_static!(Executor, Executor::new());
    executor.run(|spawner| {
        spawner.spawn(main_task(spawner)).unwrap();
    });
}
