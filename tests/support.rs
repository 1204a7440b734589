use std::ffi::OsStr;
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tokio_tungstenite::tungstenite::{self, Message};

const ACCEPT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct BackendHandle {
    requests: mpsc::Receiver<String>,
    thread: Option<thread::JoinHandle<()>>,
}

impl BackendHandle {
    /// Start request the client sent, if any arrived within `timeout`.
    pub fn start_request(&self, timeout: Duration) -> Option<String> {
        self.requests.recv_timeout(timeout).ok()
    }
}

impl Drop for BackendHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a one-shot WebSocket backend that records the start request, then
/// replays `frames` as text messages and closes.
///
/// Returns `None` when the sandbox forbids binding a local port.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_ws_backend_or_skip(
    frames: Vec<String>,
) -> Result<Option<(String, BackendHandle)>, String> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
        Err(err) => return Err(format!("bind test backend failed: {}", err)),
    };
    let addr = listener
        .local_addr()
        .map_err(|err| format!("backend addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (request_tx, request_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let Some(stream) = accept_one(&listener) else {
            return;
        };
        serve(stream, &frames, &request_tx);
    });

    Ok(Some((
        format!("ws://{}/stress-test", addr),
        BackendHandle {
            requests: request_rx,
            thread: Some(handle),
        },
    )))
}

fn accept_one(listener: &TcpListener) -> Option<TcpStream> {
    let deadline = Instant::now().checked_add(ACCEPT_TIMEOUT)?;
    while Instant::now() < deadline {
        match listener.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false).ok()?;
                return Some(stream);
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(10));
            }
            Err(_) => return None,
        }
    }
    None
}

fn serve(stream: TcpStream, frames: &[String], request_tx: &mpsc::Sender<String>) {
    let Ok(mut socket) = tungstenite::accept(stream) else {
        return;
    };
    match socket.read() {
        Ok(Message::Text(text)) => {
            drop(request_tx.send(text));
        }
        _ => return,
    }
    for frame in frames {
        if socket.send(Message::Text(frame.clone())).is_err() {
            return;
        }
    }
    drop(socket.close(None));
    // Drain until the peer acknowledges the close.
    while socket.read().is_ok() {}
}

/// Run the `loadscope` binary inside `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_loadscope<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = loadscope_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("LOADSCOPE_LOG", "error")
        .output()
        .map_err(|err| format!("run loadscope failed: {}", err))
}

fn loadscope_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_loadscope").map_or_else(
        || Err("CARGO_BIN_EXE_loadscope missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
