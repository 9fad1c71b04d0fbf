//! Clock demo - configure the device clock over a mock transport.
//!
//! This example demonstrates:
//! - Creating a `DisplayClient` over a transport
//! - Sending single-frame commands (time, clock face, brightness)
//! - Inspecting the exact bytes that would hit the radio
//!
//! With a real BLE backend, replace `MockTransport` with your
//! `Transport` implementation; everything else stays the same.

use dotmatrix_client::commands::Rgb;
use dotmatrix_client::transport::{MockTransport, DEFAULT_MTU};
use dotmatrix_client::DisplayClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new(DEFAULT_MTU);
    let wire = transport.share();
    let client = DisplayClient::new(transport);

    client.connect().await?;

    client.set_time(2026, 8, 6, 12, 30, 0).await?;
    client
        .set_clock(1, /* show date */ true, /* 24h */ true, Rgb::new(255, 255, 255))
        .await?;
    client.set_brightness(60).await?;

    client.disconnect().await?;

    for (i, frame) in wire.writes().iter().enumerate() {
        println!("write {}: {:02X?}", i, frame);
    }

    Ok(())
}
