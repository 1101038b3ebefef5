//! GUI-O toggle counter bridge binary.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: /dev/ttyUSB0 at 115200 baud
//! guio-bridge
//!
//! # Explicit port and baudrate
//! guio-bridge --port /dev/ttyUSB1 --baudrate 57600
//! ```

use clap::Parser;
use guio_bridge::{Bridge, BridgeError};
use tokio_serial::SerialPortBuilderExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Toggle counter GUI-O demo bridge
#[derive(Parser, Debug)]
#[command(name = "guio-bridge")]
#[command(about = "Serial bridge driving the GUI-O toggle counter demo")]
#[command(version)]
struct Args {
    /// Serial port
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Communication baudrate
    #[arg(short, long, default_value = "115200")]
    baudrate: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("opening serial port {} at {} baud", args.port, args.baudrate);

    let port = tokio_serial::new(&args.port, args.baudrate).open_native_async().map_err(|e| {
        BridgeError::Config(format!("failed to open serial port '{}': {e}", args.port))
    })?;

    Bridge::new(port).run().await?;

    tracing::info!("bridge stopped");

    Ok(())
}
