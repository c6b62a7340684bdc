use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const SUCCESS_BODY: &str = r#"{
    "success": true,
    "risk_level": "High",
    "description": "Low-lying floodplain near a major river.",
    "recommendations": ["a", "b"],
    "elevation": 10,
    "distance_from_water": 200,
    "location_name": "New York, NY",
    "geographic_features": "Coastal estuary",
    "ai_analysis": "Dense urban terrain with poor drainage.",
    "message": "Coordinate analysis completed successfully"
}"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub fixtures: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let fixtures = tmp.path().join("fixtures");
        fs::create_dir_all(&fixtures).expect("create fixture dir");

        Self {
            _tmp: tmp,
            home,
            fixtures,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("floodwatch");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn run_json(&self, api_base: &str, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--api-base")
            .arg(api_base)
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, api_base: &str, args: &[&str]) -> (Value, String) {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--api-base")
            .arg(api_base)
            .args(args)
            .assert()
            .failure()
            .get_output()
            .clone();
        let envelope = serde_json::from_slice(&out.stdout).expect("error json output");
        let stderr = String::from_utf8_lossy(&out.stderr).to_string();
        (envelope, stderr)
    }

    pub fn write_png(&self, name: &str) -> PathBuf {
        let path = self.fixtures.join(name);
        fs::write(&path, PNG_MAGIC).expect("write fixture image");
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.fixtures.join(name);
        fs::write(&path, bytes).expect("write fixture file");
        path
    }
}

/// Serves the canned response for every connection until the test process
/// exits.
pub fn stub_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let base = format!("http://{}", listener.local_addr().expect("stub addr"));
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            if read_request(&mut stream).is_none() {
                continue;
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    base
}

/// A base URL with nothing listening behind it.
pub fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);
    base
}

fn read_request(stream: &mut std::net::TcpStream) -> Option<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        request.extend_from_slice(&buf[..n]);
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while request.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }
    Some(())
}
