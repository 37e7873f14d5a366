//! # Raw Socket Transport
//!
//! Most network receipt printers accept ESC/POS bytes on a plain TCP
//! socket (port 9100). There is no job model: the handle only reports how
//! many bytes were delivered.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::{Document, JobHandle, JobSubmitter};
use crate::error::EscposError;

/// Conventional raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Connection timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw socket endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub host: String,
    pub port: u16,
}

impl RawConfig {
    /// Parse `host` or `host:port`.
    ///
    /// ```
    /// use escpos_press::transport::RawConfig;
    ///
    /// let cfg = RawConfig::parse("10.0.0.7").unwrap();
    /// assert_eq!(cfg.port, 9100);
    /// assert_eq!(RawConfig::parse("10.0.0.7:9101").unwrap().port, 9101);
    /// ```
    pub fn parse(addr: &str) -> Result<Self, EscposError> {
        match addr.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                let port = port.parse().map_err(|_| {
                    EscposError::Transport(format!("Invalid port in '{}'", addr))
                })?;
                Ok(Self {
                    host: host.to_string(),
                    port,
                })
            }
            Some(_) => Err(EscposError::Transport(format!("Missing host in '{}'", addr))),
            None if addr.is_empty() => Err(EscposError::Transport("Empty address".to_string())),
            None => Ok(Self {
                host: addr.to_string(),
                port: DEFAULT_PORT,
            }),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Raw TCP client. Opens one connection per submitted document.
pub struct RawClient {
    config: RawConfig,
}

impl RawClient {
    pub fn new(config: RawConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl JobSubmitter for RawClient {
    async fn submit(&self, document: &Document) -> Result<JobHandle, EscposError> {
        let addr = self.config.address();

        let mut stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .map_err(|_| EscposError::Transport(format!("Timed out connecting to {}", addr)))?
            .map_err(|e| EscposError::Transport(format!("Failed to connect to {}: {}", addr, e)))?;

        stream.write_all(&document.data).await?;
        stream.shutdown().await?;

        log::info!("sent '{}' ({} bytes) to {}", document.name, document.size(), addr);
        Ok(JobHandle::Raw {
            bytes: document.size(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_parse() {
        assert_eq!(
            RawConfig::parse("printer.local").unwrap(),
            RawConfig {
                host: "printer.local".into(),
                port: 9100
            }
        );
        assert_eq!(RawConfig::parse("10.1.2.3:9200").unwrap().port, 9200);
        assert!(RawConfig::parse("host:abc").is_err());
        assert!(RawConfig::parse(":9100").is_err());
        assert!(RawConfig::parse("").is_err());
    }

    #[tokio::test]
    async fn test_submit_delivers_bytes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let client = RawClient::new(RawConfig {
            host: "127.0.0.1".into(),
            port,
        });
        let handle = client
            .submit(&Document::new(vec![0x1B, 0x40, b'o', b'k'], "raw"))
            .await
            .unwrap();

        assert_eq!(handle, JobHandle::Raw { bytes: 4 });
        assert_eq!(server.await.unwrap(), vec![0x1B, 0x40, b'o', b'k']);
    }
}
