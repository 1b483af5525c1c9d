//! JSON-RPC front-end, modeled on the Model Context Protocol tool interface.
//!
//! Each input line is one request; each non-empty line yields exactly one response line.
//! Requests are handled strictly in arrival order on the calling thread, so a slow scan
//! delays later requests but never reorders them.

pub mod handler;
pub mod types;

pub use handler::McpServer;
pub use types::{JsonRpcRequest, JsonRpcResponse, RpcError};

use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Reads requests from `reader` until end of input, writing one response per request.
///
/// Responses are flushed immediately. Only I/O failures on the streams themselves end
/// the loop early; malformed requests are answered with an error response.
pub fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    info!("Serving JSON-RPC requests");

    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let Some(response) = server.handle_line(&line) else {
            continue;
        };

        let data = serde_json::to_string(&response)?;
        writeln!(writer, "{}", data)?;
        writer.flush()?;
    }

    debug!("Input closed, stopping server");
    Ok(())
}
