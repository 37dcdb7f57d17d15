use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ugv_teleop::{config, gamepad::GamepadConfig};

/// Gamepad teleoperation for a tracked UGV base
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Serial device of the motor control board
    #[arg(long, default_value = config::SERIAL_PORT)]
    port: String,

    /// Serial baud rate
    #[arg(long, default_value_t = config::BAUD_RATE)]
    baud: u32,

    /// Seconds to wait for a controller to pair before giving up
    #[arg(long, default_value_t = config::PAIRING_TIMEOUT.as_secs())]
    pairing_timeout: u64,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();
    let gamepad = GamepadConfig {
        pairing_timeout: Duration::from_secs(args.pairing_timeout),
        ..GamepadConfig::default()
    };

    if let Err(e) = ugv_teleop::runtime::run(&args.port, args.baud, gamepad).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
