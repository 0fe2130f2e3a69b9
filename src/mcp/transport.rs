//! Stdio transport for MCP protocol
//!
//! Writes one JSON-RPC response per line. Generic over the writer so
//! the framing contract (single line, trailing newline, flushed) is
//! testable without touching real stdout.

use crate::mcp::error::McpError;
use crate::mcp::protocol::JsonRpcResponse;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter, Stdout};
use tracing::debug;

pub struct StdioTransport<W = Stdout> {
    writer: BufWriter<W>,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: AsyncWrite + Unpin> StdioTransport<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Send a JSON-RPC response as one line
    ///
    /// Empty responses (handled notifications) produce no output.
    pub async fn send_response(&mut self, response: &JsonRpcResponse) -> Result<(), McpError> {
        if response.is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string(response)?;
        debug!("Sending: {}", json);

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        Ok(())
    }
}
