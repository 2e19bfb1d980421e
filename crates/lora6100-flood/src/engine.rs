//! The concurrent relay core: receive, reschedule, and paced send.
//!
//! ## Architecture
//!
//! Three structural threads run for the engine's lifetime, communicating
//! only through FIFO channels:
//!
//! ```text
//! transport ──▶ receive thread ──▶ inbound queue ──▶ relay thread
//!                                                       │ (one timer thread
//!                                                       ▼  per retransmission)
//! transport ◀── send thread    ◀── outbound queue ◀── timers / local injects
//! ```
//!
//! - The receive thread is the transport's sole reader; it never blocks on
//!   sending because the inbound queue is unbounded.
//! - The relay thread decides retransmission: TTL 0 is terminal, anything
//!   else is re-queued with TTL − 1 after a uniform random delay in
//!   `[0, jitter)`. Each delay runs on its own short-lived timer thread, so
//!   timers overlap freely; their enqueues serialize through the outbound
//!   queue.
//! - The send thread is the transport's sole writer. It drains the outbound
//!   queue in FIFO order and sleeps a fixed spacing after every frame, which
//!   gives the half-duplex link and its listeners settle time.
//!
//! Any transport or decode failure is fatal to the whole engine.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, info, warn};
use rand::Rng;

use lora6100_driver::Transport;
use lora6100_packet::{FloodPacket, PACKET_SIZE};

use crate::error::RelayError;

/// Default hop budget for locally originated messages.
pub const DEFAULT_INITIAL_TTL: u8 = 10;

/// Default spacing between consecutive transmissions.
pub const DEFAULT_TX_SPACING: Duration = Duration::from_millis(50);

/// Tuning knobs for the relay engine.
#[derive(Debug, Clone, Copy)]
pub struct RelayConfig {
    /// Hop budget assigned to locally originated messages.
    pub initial_ttl: u8,
    /// Upper bound of the random retransmission delay. Zero disables jitter
    /// and retransmits immediately.
    pub jitter: Duration,
    /// Minimum spacing between consecutive transmissions.
    pub tx_spacing: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            initial_ttl: DEFAULT_INITIAL_TTL,
            jitter: Duration::ZERO,
            tx_spacing: DEFAULT_TX_SPACING,
        }
    }
}

/// Handle for injecting locally originated messages into the flood.
#[derive(Clone)]
pub struct RelayHandle {
    outbound: Sender<FloodPacket>,
    initial_ttl: u8,
}

impl RelayHandle {
    /// Queue a local message for transmission.
    ///
    /// The packet gets a fresh random ID and the configured initial TTL, and
    /// goes straight onto the outbound queue: the first local transmission is
    /// never jittered, and its TTL is not decremented until it is heard back
    /// over the air.
    pub fn inject(&self, text: &[u8]) -> Result<FloodPacket, RelayError> {
        let packet = FloodPacket::local(text, self.initial_ttl)?;
        self.outbound
            .send(packet)
            .map_err(|_| RelayError::ChannelClosed)?;
        Ok(packet)
    }
}

/// The running relay engine.
///
/// Construct with [`RelayEngine::start`]; [`RelayEngine::run`] then blocks
/// until the first fatal error.
pub struct RelayEngine {
    errors: Receiver<RelayError>,
}

impl RelayEngine {
    /// Spawn the receive, relay, and send threads.
    ///
    /// `reader` and `writer` must be handles onto the same underlying device
    /// (see `Transport::try_clone`); each is exclusively owned by its thread,
    /// which is what keeps frames from interleaving on the half-duplex link.
    pub fn start(
        reader: Box<dyn Transport>,
        writer: Box<dyn Transport>,
        config: RelayConfig,
    ) -> (RelayEngine, RelayHandle) {
        let (inbound_tx, inbound_rx) = unbounded::<FloodPacket>();
        let (outbound_tx, outbound_rx) = unbounded::<FloodPacket>();
        // Each steady-state thread reports at most one fatal error.
        let (error_tx, error_rx) = bounded::<RelayError>(2);

        let receive_errors = error_tx.clone();
        thread::spawn(move || receive_loop(reader, inbound_tx, receive_errors));

        let relay_outbound = outbound_tx.clone();
        let jitter = config.jitter;
        thread::spawn(move || relay_loop(inbound_rx, relay_outbound, jitter));

        let spacing = config.tx_spacing;
        thread::spawn(move || send_loop(writer, outbound_rx, spacing, error_tx));

        let engine = RelayEngine { errors: error_rx };
        let handle = RelayHandle {
            outbound: outbound_tx,
            initial_ttl: config.initial_ttl,
        };
        (engine, handle)
    }

    /// Block until a steady-state task dies, and return its error.
    pub fn run(self) -> RelayError {
        self.errors.recv().unwrap_or(RelayError::ChannelClosed)
    }
}

/// Sole reader of the transport: decode one fixed-size frame at a time and
/// hand it to the relay thread.
fn receive_loop(
    mut reader: Box<dyn Transport>,
    inbound: Sender<FloodPacket>,
    errors: Sender<RelayError>,
) {
    let mut frame = [0u8; PACKET_SIZE];
    loop {
        if let Err(e) = reader.read_exact(&mut frame) {
            let _ = errors.send(RelayError::Io(e));
            return;
        }
        let packet = match FloodPacket::decode(&frame) {
            Ok(packet) => packet,
            Err(e) => {
                let _ = errors.send(RelayError::Packet(e));
                return;
            }
        };

        info!(
            "received id=0x{:02X} ttl={} msg={:?}",
            packet.id,
            packet.ttl,
            packet.payload_text()
        );

        if inbound.send(packet).is_err() {
            return;
        }
    }
}

/// Decide retransmission for every inbound packet.
fn relay_loop(inbound: Receiver<FloodPacket>, outbound: Sender<FloodPacket>, jitter: Duration) {
    for packet in inbound.iter() {
        let Some(next) = packet.relayed() else {
            debug!("id=0x{:02X} is terminal, not retransmitting", packet.id);
            continue;
        };

        let delay = if jitter.is_zero() {
            Duration::ZERO
        } else {
            rand::thread_rng().gen_range(Duration::ZERO..jitter)
        };
        debug!(
            "scheduling id=0x{:02X} ttl={} for retransmission in {:?}",
            next.id, next.ttl, delay
        );

        let outbound = outbound.clone();
        thread::spawn(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if outbound.send(next).is_err() {
                warn!("outbound queue closed before id=0x{:02X} fired", next.id);
            }
        });
    }
}

/// Sole writer of the transport: drain the outbound queue in FIFO order with
/// a fixed spacing after every frame.
fn send_loop(
    mut writer: Box<dyn Transport>,
    outbound: Receiver<FloodPacket>,
    spacing: Duration,
    errors: Sender<RelayError>,
) {
    for packet in outbound.iter() {
        if let Err(e) = writer.write_all(&packet.encode()) {
            let _ = errors.send(RelayError::Io(e));
            return;
        }
        debug!("sent id=0x{:02X} ttl={}", packet.id, packet.ttl);
        thread::sleep(spacing);
    }
}
