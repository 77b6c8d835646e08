//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and serves one connection at a time.  Each
//! line received is parsed as a JSON-encoded [`Command`]; key-binding
//! helpers typically connect, write one line and hang up:
//!
//! ```sh
//! echo '{"Invoke":"moveToLeft"}' | socat - UNIX-CONNECT:$XDG_RUNTIME_DIR/winsnap.sock
//! ```
//!
//! # Wire format
//!
//! ```json
//! {"Invoke":"moveToTopRight"}
//! {"Invoke":"toggle-always-on-top"}
//! {"MoveToDisplay":-1}
//! ```
//!
//! Unknown feature names and malformed lines are logged and skipped.

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader, Read};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`CommandSource`] that listens on a Unix stream socket.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What happened to the sink while serving one connection.
enum Served {
    Open,
    SinkClosed,
}

impl UnixSocketListener {
    /// Create a listener for `path`.
    ///
    /// The socket file is created when [`run`](CommandSource::run) is called
    /// and removed when it returns.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `$XDG_RUNTIME_DIR/winsnap.sock`, or `/tmp/winsnap.sock`.
    pub fn default_path() -> PathBuf {
        std::env::var_os("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("winsnap.sock")
    }

    /// The filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn accept_loop(
        &self,
        listener: &UnixListener,
        sink: &mpsc::Sender<Command>,
    ) -> Result<(), UnixSocketError> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    let served = serve(stream, sink);
                    debug!("client disconnected");
                    if let Served::SinkClosed = served {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
        Ok(())
    }
}

/// Forward every command on `stream` into `sink`.
///
/// Lines that are not UTF-8 or not a valid command are skipped; only an I/O
/// error or EOF ends the connection.
fn serve(stream: impl Read, sink: &mpsc::Sender<Command>) -> Served {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("read error: {}", e);
                break;
            }
        }
        let text = match std::str::from_utf8(&buf) {
            Ok(text) => text.trim(),
            Err(e) => {
                warn!("bad command ({} bytes): {}", buf.len(), e);
                continue;
            }
        };
        if text.is_empty() {
            continue;
        }
        match serde_json::from_str::<Command>(text) {
            Ok(cmd) => {
                debug!("received {}", cmd);
                if sink.send(cmd).is_err() {
                    return Served::SinkClosed;
                }
            }
            Err(e) => warn!("bad command {:?}: {}", text, e),
        }
    }
    Served::Open
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** until the sink is dropped.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        let result = self.accept_loop(&listener, &sink);
        let _ = std::fs::remove_file(&self.path);
        result
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DisplayOffset, Feature};
    use std::io::Write;
    use std::os::unix::net::UnixStream;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("winsnap-test-{}-{}.sock", std::process::id(), id))
    }

    fn spawn_listener(path: &Path) -> mpsc::Receiver<Command> {
        let (tx, rx) = mpsc::channel();
        let path = path.to_path_buf();
        std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&path);
            let _ = listener.run(tx);
        });
        // Give the listener a moment to bind.
        std::thread::sleep(Duration::from_millis(150));
        rx
    }

    #[test]
    fn commands_arrive_over_socket() {
        let path = tmp_socket_path();
        let rx = spawn_listener(&path);

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            writeln!(stream, r#"{{"Invoke":"moveToLeft"}}"#).unwrap();
            writeln!(stream).unwrap();
            writeln!(stream, r#"  {{"Invoke":"next-display"}}  "#).unwrap();
            writeln!(stream, r#"{{"MoveToDisplay":"-2"}}"#).unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        let cmds: Vec<Command> = (0..3)
            .filter_map(|_| rx.recv_timeout(Duration::from_secs(2)).ok())
            .collect();
        assert_eq!(
            cmds,
            vec![
                Command::Invoke(Feature::parse("moveToLeft").unwrap()),
                Command::Invoke(Feature::parse("nextDisplay").unwrap()),
                Command::MoveToDisplay(DisplayOffset(-2)),
            ]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn bad_lines_are_skipped() {
        let path = tmp_socket_path();
        let rx = spawn_listener(&path);

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            writeln!(stream, "not json at all").unwrap();
            writeln!(stream, r#"{{"Invoke":"teleport"}}"#).unwrap();
            writeln!(stream, r#"{{"Invoke":"maximize"}}"#).unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        let cmd = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(cmd, Command::Invoke(Feature::parse("maximize").unwrap()));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn non_utf8_line_does_not_end_connection() {
        let (tx, rx) = mpsc::channel();
        let input: &[u8] = b"\xff\xfe bad\n{\"Invoke\":\"maximize\"}\n";
        assert!(matches!(serve(input, &tx), Served::Open));
        let cmds: Vec<Command> = rx.try_iter().collect();
        assert_eq!(cmds, vec![Command::Invoke(Feature::parse("maximize").unwrap())]);
    }

    #[test]
    fn last_line_without_newline_is_accepted() {
        let (tx, rx) = mpsc::channel();
        let input: &[u8] = b"{\"MoveToDisplay\":1}";
        serve(input, &tx);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn serve_stops_when_sink_is_closed() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let input: &[u8] = b"{\"Invoke\":\"moveToCenter\"}\n";
        assert!(matches!(serve(input, &tx), Served::SinkClosed));
    }

    #[test]
    fn default_path_ends_with_socket_name() {
        assert!(UnixSocketListener::default_path().ends_with("winsnap.sock"));
    }
}
