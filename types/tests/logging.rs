use std::io;
use std::sync::{Arc, Mutex};

use ntstatus_types::ThirtyTwoBits;
use tracing::{Level, subscriber};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    subscriber::with_default(subscriber, f);
    logs.contents()
}

#[test]
fn json_rejections_emit_debug_events() {
    let type_error = capture(|| {
        let value = serde_json::json!("5");
        assert!(ThirtyTwoBits::try_from(&value).is_err());
    });
    assert!(type_error.contains("DEBUG"), "{type_error}");
    assert!(type_error.contains("rejected 32-bit value"), "{type_error}");
    assert!(type_error.contains("not a valid integer value"), "{type_error}");

    let range_error = capture(|| {
        let value = serde_json::json!(4_294_967_296_u64);
        assert!(ThirtyTwoBits::try_from(&value).is_err());
    });
    assert!(
        range_error.contains("representable in 32 bits: 4294967296"),
        "{range_error}"
    );

    let accepted = capture(|| {
        let value = serde_json::json!(-1);
        assert!(ThirtyTwoBits::try_from(&value).is_ok());
    });
    assert!(accepted.is_empty(), "{accepted}");
}
