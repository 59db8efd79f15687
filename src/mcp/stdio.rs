// Line-delimited stdio transport for the tool protocol
// Author: kelexine (https://github.com/kelexine)

use super::protocol::{JsonRpcResponse, PARSE_ERROR};
use super::McpServer;
use crate::error::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Serve the tool protocol on stdin/stdout until stdin closes.
pub async fn serve(server: McpServer) -> Result<()> {
    info!("Serving tool protocol on stdio");
    run(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// One JSON-RPC message per input line, one response per output line.
///
/// A line that is not valid UTF-8 gets a parse error reply; later lines are
/// still answered.
pub async fn run<R, W>(server: McpServer, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                server.handle_message(line).await
            }
            Err(e) => {
                warn!("Tool protocol line is not valid UTF-8: {}", e);
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_vec(&response)?;
            payload.push(b'\n');
            writer.write_all(&payload).await?;
            writer.flush().await?;
        }
    }

    debug!("stdin closed, stopping stdio transport");
    Ok(())
}
