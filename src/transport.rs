// Command queue and serial transport
//
// Producers submit commands from any task or thread without blocking; a
// single consumer drains the queue and writes frames to the transport, so
// frames reach the wire in submission order with at most one write in
// flight. The queue is unbounded: a stalled transport grows memory instead
// of applying backpressure. A write failure kills the consumer with no
// retry; the vehicle goes quiet and external monitoring has to notice.

use std::io::Write;

use serialport::SerialPort;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SERIAL_TIMEOUT;
use crate::messages::Command;

/// Error types for the transport
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Producer half of the command queue. Cheap to clone; `submit` never
/// blocks.
#[derive(Debug, Clone)]
pub struct CommandSink {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSink {
    pub fn submit(&self, command: Command) {
        // A send error means the writer is gone; the writer surfaces its
        // own failure, so the drop is intentional here.
        if self.tx.send(command).is_err() {
            debug!("command dropped, transport writer has exited");
        }
    }
}

/// Consumer half, owned by exactly one writer.
#[derive(Debug)]
pub struct CommandQueue {
    pub(crate) rx: mpsc::UnboundedReceiver<Command>,
}

/// Create a connected sink/queue pair.
pub fn channel() -> (CommandSink, CommandQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSink { tx }, CommandQueue { rx })
}

/// Open the serial link to the motor control board.
pub fn open_serial(port_name: &str, baud: u32) -> Result<Box<dyn SerialPort>, TransportError> {
    info!("Opening serial transport on {} at {} baud", port_name, baud);
    let port = serialport::new(port_name, baud)
        .timeout(SERIAL_TIMEOUT)
        .open()?;
    Ok(port)
}

/// Spawn the transport writer on a blocking thread.
///
/// Runs until every `CommandSink` clone is dropped, then drains and exits.
/// Returns the first encode or write error, leaving queued commands
/// unsent.
pub fn spawn_writer<W>(mut queue: CommandQueue, mut writer: W) -> JoinHandle<Result<(), TransportError>>
where
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        while let Some(command) = queue.rx.blocking_recv() {
            let frame = command.encode()?;
            writer.write_all(frame.as_bytes())?;
        }
        debug!("command queue closed, transport writer exiting");
        Ok(())
    })
}
