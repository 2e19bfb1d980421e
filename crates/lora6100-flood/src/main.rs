//! `floodtest`: configure a LoRa6100 module and run the flood relay on it.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use lora6100_driver::Lora6100;
use lora6100_flood::{RelayConfig, RelayEngine, DEFAULT_INITIAL_TTL};
use lora6100_packet::PAYLOAD_SIZE;

#[derive(Parser, Debug)]
#[command(name = "floodtest", about = "Flood relay over a LoRa6100 module")]
struct Args {
    /// Serial port the module is attached to.
    #[arg(default_value = "/dev/ttyUSB0")]
    port: String,

    /// Show the firmware version and parameters on startup (requires RTS
    /// wired to the module's SET pin).
    #[arg(long)]
    info: bool,

    /// Seed message to transmit once at startup (at most 40 bytes).
    #[arg(long)]
    msg: Option<String>,

    /// Upper bound in milliseconds of the random delay before each
    /// retransmission. 0 retransmits immediately.
    #[arg(long, default_value_t = 0)]
    rdelay: u64,

    /// Hop budget assigned to locally originated messages.
    #[arg(long, default_value_t = DEFAULT_INITIAL_TTL)]
    ttl: u8,

    /// Minimum spacing in milliseconds between transmissions.
    #[arg(long, default_value_t = 50)]
    spacing: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Some(msg) = &args.msg {
        if msg.len() > PAYLOAD_SIZE {
            error!("seed message is too long: {} bytes (max {})", msg.len(), PAYLOAD_SIZE);
            return ExitCode::FAILURE;
        }
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("opening device {}", args.port);
    let mut driver = Lora6100::new(&args.port);
    driver.open()?;

    // Configuration phase, fully completed before any relay thread starts.
    if args.info {
        let version = driver.get_version()?;
        println!("Version: {}", version);

        let params = driver.get_parameters()?;
        println!("Parameters: {:?}", params);
    }

    let config = RelayConfig {
        initial_ttl: args.ttl,
        jitter: Duration::from_millis(args.rdelay),
        tx_spacing: Duration::from_millis(args.spacing),
    };
    let (reader, writer) = driver.split()?;
    let (engine, handle) = RelayEngine::start(reader, writer, config);

    if let Some(msg) = &args.msg {
        let packet = handle.inject(msg.as_bytes())?;
        info!("seeded flood message id=0x{:02X} ttl={}", packet.id, packet.ttl);
    }

    info!("listening for messages");
    // Steady-state errors are fatal to the whole relay.
    Err(engine.run().into())
}
