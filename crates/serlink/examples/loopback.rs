//! Drive a session against a scripted in-memory link.
//!
//! Run with: cargo run --example loopback

use serlink::{encode_frame, MemoryLink, Session, SessionEvent, Step, INFO, LOG, NAME};

fn main() -> Result<(), serlink::SessionError> {
    let mut link = MemoryLink::new();

    // Script the device side of a full handshake plus one log line.
    link.feed(&encode_frame(INFO, 7, 1, 3));
    link.feed(&[0x03, 9, 0, 9, 0, 0xFF]); // announce: 9 bytes under key 9
    link.feed(b"demoboard");
    link.feed(&encode_frame(NAME, 9, 0, 0));
    link.feed(&[0x03, 14, 0, 1, 0, 0xFF]); // announce: 14 bytes under key 1
    link.feed(b"booted in 42ms");
    link.feed(&encode_frame(LOG, 3, 1, 0));

    let mut session = Session::new(link);
    session.begin()?;

    loop {
        if session.poll()? == Step::Idle {
            break;
        }
        while let Some(event) = session.next_event() {
            match event {
                SessionEvent::Open => {
                    println!(
                        "connected to '{}' (id {}, firmware v{}, library v{})",
                        session.device_name().unwrap_or("?"),
                        session.device_id(),
                        session.device_version(),
                        session.device_library_version(),
                    );
                }
                SessionEvent::Log { severity, message } => {
                    let label = serlink::LogSeverity::from_wire(severity);
                    println!("[{label}] {message}");
                }
            }
        }
    }

    Ok(())
}
