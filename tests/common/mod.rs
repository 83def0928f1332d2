#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use serde_json::{json, Value};
use tempfile::TempDir;

pub fn stats(fg_pct: f64, accuracy: f64, errors: u64) -> Value {
    json!({
        "alerts": 20, "adjAlerts": 18, "factGenie": 6,
        "factGeniePercent": fg_pct, "avgTimeGap": 4.25,
        "snaps10": 3, "snaps20": 1, "avgLength": 72.5,
        "snaps150": 0, "errors": errors, "accuracy": accuracy
    })
}

pub fn row(name: &str, unknown: bool, accuracy: f64) -> Value {
    let mut row = stats(45.0, accuracy, 0);
    row["snapper"] = json!(name);
    row["isUnknown"] = json!(unknown);
    row
}

/// Two reports: the newest with a raw period, the older with only a date.
pub fn sample_document() -> Value {
    json!([
        {
            "date": "05/04/2024",
            "timestamp": 1_712_300_000_000_i64,
            "reportPeriod": "01/03/2024-31/03/2024",
            "results": [row("Zed", false, 99.5), row("Ann", true, 10.0), row("bob", false, 93.0)],
            "totals": stats(40.0, 80.0, 3),
            "totalsExTurboPLX": stats(50.0, 85.0, 1)
        },
        {
            "date": "29/02/2024",
            "timestamp": 1_709_200_000_000_i64,
            "results": [row("Old", false, 96.0)],
            "totals": stats(40.0, 96.0, 0),
            "totalsExTurboPLX": stats(40.0, 96.0, 0)
        }
    ])
}

/// Write `body` to a file in a fresh temp dir. Hold onto the `TempDir`.
pub fn write_document(body: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, body).unwrap();
    (dir, path)
}

/// Serve a single HTTP response on a random local port. Returns the base
/// URL and a receiver yielding the request line that was received.
pub fn serve_once(status: u16, body: String) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                break;
            }
        }
        tx.send(request_line.trim_end().to_string()).unwrap();

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    (format!("http://{addr}/data.json"), rx)
}
