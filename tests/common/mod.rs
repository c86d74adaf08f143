//! Shared utilities for integration testing the webhook receiver.

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing_subscriber::fmt::MakeWriter;
use webhook_sink::config::ReceiverConfig;
use webhook_sink::lifecycle::ServerController;

/// Bind a receiver on an ephemeral loopback port.
///
/// Port 0 deliberately skips the CLI-level validation so tests never
/// race over fixed port numbers.
pub async fn start_receiver() -> ServerController {
    let config = ReceiverConfig {
        port: 0,
        host: "127.0.0.1".to_string(),
        ..ReceiverConfig::default()
    };
    ServerController::bind(config).await.expect("bind receiver")
}

/// Open a POST whose body is withheld, leaving the request in flight.
///
/// The request head announces a Content-Length the server has to wait
/// for, which is what keeps the connection draining during shutdown.
#[allow(dead_code)]
pub async fn open_stalled_post(addr: SocketAddr, body: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("connect to receiver");
    let head = format!(
        "POST / HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nContent-Length: {}\r\n\r\n",
        addr,
        body.len()
    );
    stream
        .write_all(head.as_bytes())
        .await
        .expect("write request head");
    stream.flush().await.expect("flush request head");
    stream
}

/// Send the withheld body and read the server's full response.
#[allow(dead_code)]
pub async fn complete_stalled_post(mut stream: TcpStream, body: &str) -> String {
    stream
        .write_all(body.as_bytes())
        .await
        .expect("write request body");
    stream.flush().await.expect("flush request body");

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    String::from_utf8_lossy(&response).into_owned()
}

/// Collects everything the fmt subscriber writes, for asserting on
/// trace output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct TraceCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl TraceCapture {
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl<'a> MakeWriter<'a> for TraceCapture {
    type Writer = TraceWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TraceWriter {
            buf: self.buf.clone(),
        }
    }
}

#[allow(dead_code)]
pub struct TraceWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for TraceWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install a capturing subscriber as this thread's default.
///
/// Keep the guard alive while traces matter, and drive requests with
/// `oneshot` so the handlers run on the test thread.
#[allow(dead_code)]
pub fn capture_traces() -> (TraceCapture, tracing::subscriber::DefaultGuard) {
    let capture = TraceCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
