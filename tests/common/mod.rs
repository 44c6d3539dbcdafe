#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

pub const BIN: &str = env!("CARGO_BIN_EXE_survey-store");

/// Running daemon; killed on drop.
pub struct Daemon {
    child: Child,
    pub addr: SocketAddr,
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

fn base_command(data_dir: &Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env("DOTENV_PATH", data_dir.join("missing.env"))
        .env_remove("SURVEY_STORE_DATABASE")
        .env_remove("SURVEY_STORE_CONTAINER")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

pub fn start_daemon(data_dir: &Path) -> Daemon {
    let addr = free_addr();
    let child = base_command(data_dir)
        .arg("--api-listen")
        .arg(addr.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn survey-store daemon");
    let daemon = Daemon { child, addr };

    let deadline = Instant::now() + Duration::from_secs(30);
    while TcpStream::connect(addr).is_err() {
        if Instant::now() > deadline {
            panic!("daemon did not start listening on {addr}");
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    daemon
}

pub fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    base_command(data_dir)
        .args(args)
        .output()
        .expect("run survey-store command")
}

pub struct HttpResponse {
    pub status: u16,
    pub headers: String,
    pub body: String,
}

pub fn request(addr: SocketAddr, method: &str, target: &str, body: Option<&str>) -> HttpResponse {
    let mut stream = TcpStream::connect(addr).expect("connect");
    let body = body.unwrap_or("");
    let raw = format!(
        "{method} {target} HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(raw.as_bytes()).expect("write request");

    let mut buffer = String::new();
    stream.read_to_string(&mut buffer).expect("read response");

    let (head, body) = buffer
        .split_once("\r\n\r\n")
        .expect("response has header terminator");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("status code");

    HttpResponse {
        status,
        headers: head.to_ascii_lowercase(),
        body: body.to_string(),
    }
}
