//! End-to-end protocol scenarios through the public facade.

use serlink::{
    encode_frame, MemoryLink, Session, SessionError, SessionEvent, SessionState, Step, INFO, LOG,
    NAME,
};

fn feed_vector(link: &mut MemoryLink, key: u16, payload: &[u8]) {
    let size = payload.len() as u16;
    link.feed(&[
        0x03,
        (size & 0xFF) as u8,
        (size >> 8) as u8,
        (key & 0xFF) as u8,
        (key >> 8) as u8,
        0xFF,
    ]);
    link.feed(payload);
}

fn drain(session: &mut Session<MemoryLink>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    loop {
        match session.poll().expect("poll should succeed") {
            Step::Idle => break,
            Step::Processed => {
                while let Some(event) = session.next_event() {
                    events.push(event);
                }
            }
        }
    }
    events
}

#[test]
fn full_handshake_then_log_stream() {
    let mut link = MemoryLink::new();
    link.feed(&encode_frame(INFO, 7, 2, 5));
    feed_vector(&mut link, 9, b"hello");
    link.feed(&encode_frame(NAME, 9, 0, 0));
    feed_vector(&mut link, 300, b"temp nominal");
    link.feed(&encode_frame(LOG, 3, (300u16 & 0xFF) as u8, (300u16 >> 8) as u8));

    let mut session = Session::new(link);
    session.begin().unwrap();
    session.link_mut().take_written();

    let events = drain(&mut session);

    assert_eq!(session.device_id(), 7);
    assert_eq!(session.device_library_version(), 2);
    assert_eq!(session.device_version(), 5);
    assert_eq!(session.device_name(), Some("hello"));
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(
        events,
        vec![
            SessionEvent::Open,
            SessionEvent::Log {
                severity: 3,
                message: "temp nominal".to_string()
            }
        ]
    );

    // the ready ack is the only outbound traffic after begin()
    assert_eq!(
        session.link_mut().take_written(),
        encode_frame(0x04, 0, 0, 0).to_vec()
    );
}

#[test]
fn user_command_after_open() {
    let mut link = MemoryLink::new();
    link.feed(&encode_frame(INFO, 1, 1, 1));
    feed_vector(&mut link, 2, b"dev");
    link.feed(&encode_frame(NAME, 2, 0, 0));

    let mut session = Session::new(link);
    session.begin().unwrap();
    let events = drain(&mut session);
    assert_eq!(events, vec![SessionEvent::Open]);

    // the caller reacts to open by sending an application command
    session.write_command(0x10, 0, 0, 0).unwrap();
    let written = session.link_mut().take_written();
    assert!(written.ends_with(&encode_frame(0x10, 0, 0, 0)));
}

#[test]
fn device_error_is_terminal() {
    let mut link = MemoryLink::new();
    link.feed(&encode_frame(serlink::DEVICE_ERROR, 0, 0, 0));
    link.feed(b"overtemp\n");

    let mut session = Session::new(link);
    session.begin().unwrap();

    let err = session.poll().unwrap_err();
    match err {
        SessionError::DeviceReported(text) => assert!(text.contains("overtemp")),
        other => panic!("expected DeviceReported, got {other:?}"),
    }
    assert_eq!(session.state(), SessionState::Faulted);
    assert!(matches!(session.poll(), Err(SessionError::Faulted)));
}
