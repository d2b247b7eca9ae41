#![allow(dead_code)]

use std::path::Path;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Writes one framed JSON-RPC message.
pub async fn send_msg<W: AsyncWrite + Unpin>(writer: &mut W, msg: &str) {
    let framed = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(framed.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

/// Reads one framed JSON-RPC message.
///
/// Returns `None` at end of stream or when the header block has no usable
/// `Content-Length`.
pub async fn recv_msg<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut content_length = None;

    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await.ok()? == 0 {
            return None;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse::<usize>().ok();
        }
    }

    let mut body = vec![0u8; content_length?];
    reader.read_exact(&mut body).await.ok()?;
    String::from_utf8(body).ok()
}

/// Polls `condition` until it holds or `timeout` elapses.
pub async fn wait_for<F: FnMut() -> bool>(timeout: Duration, mut condition: F) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// Whether a usable `python3` is on the PATH.
pub fn python_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).map_or(true, |mut entries| entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(payload: &str) -> std::io::Cursor<Vec<u8>> {
        let data = format!("Content-Length: {}\r\n\r\n{}", payload.len(), payload);
        std::io::Cursor::new(data.into_bytes())
    }

    #[tokio::test]
    async fn test_recv_msg_reads_consecutive_messages() {
        let first = r#"{"jsonrpc":"2.0","method":"a","params":{}}"#;
        let second = r#"{"jsonrpc":"2.0","method":"b","params":{}}"#;
        let mut data = framed(first).into_inner();
        data.extend(framed(second).into_inner());
        let mut cursor = std::io::Cursor::new(data);

        assert_eq!(recv_msg(&mut cursor).await.as_deref(), Some(first));
        assert_eq!(recv_msg(&mut cursor).await.as_deref(), Some(second));
        assert_eq!(recv_msg(&mut cursor).await, None);
    }

    #[tokio::test]
    async fn test_recv_msg_ignores_other_headers() {
        let payload = "{}";
        let data = format!(
            "content-length: 2\r\nContent-Type: application/vscode-jsonrpc\r\n\r\n{}",
            payload
        );
        let mut cursor = std::io::Cursor::new(data.into_bytes());

        assert_eq!(recv_msg(&mut cursor).await.as_deref(), Some(payload));
    }

    #[tokio::test]
    async fn test_recv_msg_rejects_bad_length() {
        let mut cursor = std::io::Cursor::new(b"Content-Length: invalid\r\n\r\n{}".to_vec());
        assert_eq!(recv_msg(&mut cursor).await, None);
    }
}
