use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roomba_oi_driver::config::{BAUD_RATE, DEFAULT_PORT, DEFAULT_SPEED};
use roomba_oi_driver::{OiMode, RoombaDriver};

#[derive(Parser)]
#[command(name = "roomba-oi", about = "Drive a Roomba over its serial Open Interface")]
struct Cli {
    /// Serial port connected to the OI
    #[arg(short, long, default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate
    #[arg(long, default_value_t = BAUD_RATE)]
    baud: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print battery and mode telemetry as JSON
    Status,
    /// Start a standard cleaning cycle
    Clean,
    /// Start a spot cleaning cycle
    Spot,
    /// Start a max-duration cleaning cycle
    Max,
    /// Drive to the charging dock
    Dock,
    /// Drive straight ahead, then stop
    Forward {
        /// Speed in mm/s
        #[arg(default_value_t = DEFAULT_SPEED)]
        speed: i16,
        /// How long to drive before stopping
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,
    },
    /// Drive straight back, then stop
    Back {
        #[arg(default_value_t = DEFAULT_SPEED)]
        speed: i16,
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,
    },
    /// Turn left in place, then stop
    TurnLeft {
        #[arg(default_value_t = DEFAULT_SPEED)]
        speed: i16,
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,
    },
    /// Turn right in place, then stop
    TurnRight {
        #[arg(default_value_t = DEFAULT_SPEED)]
        speed: i16,
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,
    },
    /// Rotate roughly 180 degrees (open loop)
    TurnAround,
    /// Stop the wheels
    Stop,
    /// Stop the wheels and power the robot down
    PowerOff,
}

fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = RoombaDriver::open_with_baudrate(&cli.port, cli.baud)?;

    // The OI ignores everything until it has seen Start
    driver.start()?;

    match cli.command {
        Command::Status => {
            let battery = driver.battery_status()?;
            let mode = driver.oi_mode()?;
            let report = serde_json::json!({ "mode": mode, "battery": battery });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Clean => driver.clean()?,
        Command::Spot => driver.spot()?,
        Command::Max => driver.max_clean()?,
        Command::Dock => driver.seek_dock()?,
        Command::Forward { speed, duration_ms } => {
            driver.set_mode(OiMode::Safe)?;
            driver.go_ahead(speed)?;
            thread::sleep(Duration::from_millis(duration_ms));
            driver.stop()?;
        }
        Command::Back { speed, duration_ms } => {
            driver.set_mode(OiMode::Safe)?;
            driver.go_back(speed)?;
            thread::sleep(Duration::from_millis(duration_ms));
            driver.stop()?;
        }
        Command::TurnLeft { speed, duration_ms } => {
            driver.set_mode(OiMode::Safe)?;
            driver.turn_left(speed)?;
            thread::sleep(Duration::from_millis(duration_ms));
            driver.stop()?;
        }
        Command::TurnRight { speed, duration_ms } => {
            driver.set_mode(OiMode::Safe)?;
            driver.turn_right(speed)?;
            thread::sleep(Duration::from_millis(duration_ms));
            driver.stop()?;
        }
        Command::TurnAround => {
            driver.set_mode(OiMode::Safe)?;
            driver.turn_in_place()?;
        }
        Command::Stop => driver.stop()?,
        Command::PowerOff => driver.shutdown()?,
    }

    Ok(())
}
