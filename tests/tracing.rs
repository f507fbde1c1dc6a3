#![allow(missing_docs)]

use std::io;
use std::sync::{Arc, Mutex};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use volga_endpoint_test::{http::StatusCode, EndpointTest, Failures, HttpRequest, ResponseRecorder};

#[derive(Default, Deserialize)]
struct Item {
    #[allow(dead_code)]
    id: u32,
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn output(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn capture_logs(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("volga_endpoint_test=trace"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    capture.output()
}

fn oops(res: &mut ResponseRecorder, _req: HttpRequest) {
    res.write_bytes(b"oops");
}

#[test]
fn it_logs_running_case() {
    let logs = capture_logs(|| {
        let mut failures = Failures::new();
        let handler = |res: &mut ResponseRecorder, _: HttpRequest| {
            res.write_bytes(br#"{"id":1}"#);
        };

        EndpointTest::get("get item", "/items/1", handler, |_, _, _: Item| {})
            .run(&mut failures);
    });

    assert!(logs.contains("running endpoint test"));
    assert!(logs.contains("get item"));
}

#[test]
fn it_logs_reported_failures() {
    let logs = capture_logs(|| {
        let mut failures = Failures::new();

        EndpointTest::get("oops", "/oops", oops, |_, _, _: Item| {})
            .run(&mut failures);
    });

    assert!(logs.contains("ERROR"));
    assert!(logs.contains("failed deserializing response body"));
}

#[test]
fn it_logs_superfluous_status_writes() {
    let logs = capture_logs(|| {
        let mut recorder = ResponseRecorder::new();
        recorder.write_status(StatusCode::CREATED);
        recorder.write_status(StatusCode::OK);
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("superfluous write_status"));
}
