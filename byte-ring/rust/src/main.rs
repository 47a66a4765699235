use anyhow::Result;
use bytering::{
    config::Config,
    ring_buffer::{RingBuffer, RingBufferError},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let mut rb = config.ring_buffer()?;

    let received = stage(&mut rb, config.message().as_bytes())?;
    println!("{}", String::from_utf8_lossy(&received));

    rb.destroy();
    Ok(())
}

/// Feeds `payload` into `rb` one byte at a time, like an RX interrupt would,
/// and drains the buffer from the consumer side whenever it fills up.
fn stage(rb: &mut RingBuffer, payload: &[u8]) -> Result<Vec<u8>, RingBufferError> {
    let mut received = Vec::with_capacity(payload.len());
    let mut stalls = 0usize;

    for &byte in payload {
        loop {
            match rb.push(byte) {
                Ok(()) => break,
                Err(RingBufferError::Full) if !rb.is_empty() => {
                    stalls += 1;
                    debug!(queued = rb.len(), "staging buffer full, draining");
                    received.extend(rb.drain());
                }
                Err(e) => return Err(e),
            }
        }
    }
    received.extend(rb.drain());

    info!(
        bytes = received.len(),
        capacity = rb.capacity(),
        stalls,
        "transfer complete"
    );

    Ok(received)
}
