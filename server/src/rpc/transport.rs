//! Line-delimited JSON-RPC transport.

use super::protocol::{JsonRpcRequest, JsonRpcResponse};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Async transport: one JSON-RPC message per line
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

impl LineTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Transport over the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read the next request, skipping blank lines
    ///
    /// Returns `Ok(None)` at end of input and `InvalidData` for a line that
    /// is not a JSON-RPC request.
    pub async fn read_request(&mut self) -> io::Result<Option<JsonRpcRequest>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None); // EOF
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return match serde_json::from_str(trimmed) {
                Ok(request) => Ok(Some(request)),
                Err(e) => {
                    tracing::error!("Failed to parse JSON-RPC request: {}", e);
                    Err(io::Error::new(io::ErrorKind::InvalidData, e))
                }
            };
        }
    }

    /// Write a response followed by a newline
    pub async fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response)?;
        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Consume the transport, returning the writer
    pub fn into_writer(self) -> W {
        self.writer
    }
}
