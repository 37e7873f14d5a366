//! # IPP Transport
//!
//! Submits documents with an IPP/1.1 `Print-Job` request (RFC 8010/8011)
//! posted to `http(s)://host:port/printers/<queue>`.
//!
//! ## Request Layout
//!
//! All integers are **big-endian**.
//!
//! ```text
//! 01 01            version 1.1
//! 00 02            operation-id: Print-Job
//! xx xx xx xx      request-id
//! 01               operation-attributes-tag
//!   tag len name len value     (repeated)
//! 03               end-of-attributes-tag
//! ...              document bytes
//! ```
//!
//! Operation attributes sent, in order: `attributes-charset`,
//! `attributes-natural-language`, `printer-uri`, `requesting-user-name`,
//! `job-name`, `document-format`.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use super::{Document, JobHandle, JobSubmitter};
use crate::error::EscposError;

/// Default IPP port
pub const DEFAULT_PORT: u16 = 631;

/// Content type of IPP request and response bodies
pub const MIME_IPP: &str = "application/ipp";

/// User name sent when none is configured
const ANONYMOUS_USER: &str = "anonymous";

const OP_PRINT_JOB: u16 = 0x0002;

// Delimiter tags
const TAG_OPERATION_ATTRIBUTES: u8 = 0x01;
const TAG_END_OF_ATTRIBUTES: u8 = 0x03;

// Value tags
const TAG_INTEGER: u8 = 0x21;
const TAG_TEXT: u8 = 0x41;
const TAG_NAME: u8 = 0x42;
const TAG_URI: u8 = 0x45;
const TAG_CHARSET: u8 = 0x47;
const TAG_NATURAL_LANGUAGE: u8 = 0x48;
const TAG_MIME_MEDIA_TYPE: u8 = 0x49;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Where and how to reach an IPP printer queue.
#[derive(Debug, Clone)]
pub struct IppConfig {
    pub host: String,
    pub port: u16,
    /// Queue name under `/printers/`
    pub printer: String,
    /// Empty for unauthenticated access
    pub user: String,
    pub password: String,
    pub tls: bool,
    /// Skip certificate verification (self-signed CUPS certificates)
    pub accept_invalid_certs: bool,
}

impl Default for IppConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            printer: String::new(),
            user: String::new(),
            password: String::new(),
            tls: true,
            accept_invalid_certs: false,
        }
    }
}

impl IppConfig {
    /// The `printer-uri` operation attribute.
    ///
    /// ```
    /// use escpos_press::transport::IppConfig;
    ///
    /// let config = IppConfig { printer: "receipts".into(), ..Default::default() };
    /// assert_eq!(config.printer_uri(), "ipp://localhost:631/printers/receipts");
    /// ```
    pub fn printer_uri(&self) -> String {
        format!("ipp://{}:{}/printers/{}", self.host, self.port, self.printer)
    }

    /// HTTP endpoint the request is posted to.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!(
            "{}://{}:{}/printers/{}",
            scheme, self.host, self.port, self.printer
        )
    }

    fn user_name(&self) -> &str {
        if self.user.is_empty() {
            ANONYMOUS_USER
        } else {
            &self.user
        }
    }
}

// ============================================================================
// ENCODING
// ============================================================================

/// Length field of an attribute name or value.
fn field_len(name: &str, len: usize) -> Result<[u8; 2], EscposError> {
    u16::try_from(len).map(u16::to_be_bytes).map_err(|_| {
        EscposError::Transport(format!(
            "IPP attribute '{}' is {} bytes, limit is {}",
            name,
            len,
            u16::MAX
        ))
    })
}

fn put_attribute(buf: &mut Vec<u8>, tag: u8, name: &str, value: &[u8]) -> Result<(), EscposError> {
    let name_len = field_len(name, name.len())?;
    let value_len = field_len(name, value.len())?;
    buf.push(tag);
    buf.extend_from_slice(&name_len);
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(&value_len);
    buf.extend_from_slice(value);
    Ok(())
}

/// Encode a complete `Print-Job` request body, document included.
///
/// Attribute names and values longer than 65535 bytes cannot be encoded
/// and are reported as transport errors.
pub fn encode_print_job(
    config: &IppConfig,
    request_id: u32,
    document: &Document,
) -> Result<Vec<u8>, EscposError> {
    let mut buf = Vec::with_capacity(256 + document.data.len());
    buf.extend_from_slice(&[1, 1]);
    buf.extend_from_slice(&OP_PRINT_JOB.to_be_bytes());
    buf.extend_from_slice(&request_id.to_be_bytes());

    buf.push(TAG_OPERATION_ATTRIBUTES);
    put_attribute(&mut buf, TAG_CHARSET, "attributes-charset", b"utf-8")?;
    put_attribute(
        &mut buf,
        TAG_NATURAL_LANGUAGE,
        "attributes-natural-language",
        b"en-us",
    )?;
    put_attribute(&mut buf, TAG_URI, "printer-uri", config.printer_uri().as_bytes())?;
    put_attribute(
        &mut buf,
        TAG_NAME,
        "requesting-user-name",
        config.user_name().as_bytes(),
    )?;
    put_attribute(&mut buf, TAG_NAME, "job-name", document.name.as_bytes())?;
    put_attribute(
        &mut buf,
        TAG_MIME_MEDIA_TYPE,
        "document-format",
        document.mime_type.as_bytes(),
    )?;
    buf.push(TAG_END_OF_ATTRIBUTES);

    buf.extend_from_slice(&document.data);
    Ok(buf)
}

// ============================================================================
// DECODING
// ============================================================================

/// The parts of an IPP response this client cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IppResponse {
    pub status: u16,
    pub request_id: u32,
    pub job_id: Option<i32>,
    pub status_message: Option<String>,
}

impl IppResponse {
    /// `successful-*` status codes are 0x0000..=0x00FF.
    pub fn is_success(&self) -> bool {
        self.status <= 0x00FF
    }
}

/// Registered name of an IPP status code.
pub fn status_name(status: u16) -> &'static str {
    match status {
        0x0000 => "successful-ok",
        0x0001 => "successful-ok-ignored-or-substituted-attributes",
        0x0002 => "successful-ok-conflicting-attributes",
        0x0400 => "client-error-bad-request",
        0x0401 => "client-error-forbidden",
        0x0402 => "client-error-not-authenticated",
        0x0403 => "client-error-not-authorized",
        0x0404 => "client-error-not-possible",
        0x0405 => "client-error-timeout",
        0x0406 => "client-error-not-found",
        0x0407 => "client-error-gone",
        0x0408 => "client-error-request-entity-too-large",
        0x040A => "client-error-document-format-not-supported",
        0x0500 => "server-error-internal-error",
        0x0501 => "server-error-operation-not-supported",
        0x0503 => "server-error-version-not-supported",
        0x0504 => "server-error-device-error",
        0x0506 => "server-error-not-accepting-jobs",
        0x0507 => "server-error-busy",
        _ => "unknown-status",
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], EscposError> {
        let end = self.pos + n;
        let slice = self.buf.get(self.pos..end).ok_or_else(|| {
            EscposError::Transport(format!(
                "truncated IPP response at byte {} of {}",
                self.pos,
                self.buf.len()
            ))
        })?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, EscposError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, EscposError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, EscposError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parse an IPP response body.
///
/// Only `job-id` and `status-message` are extracted; every other attribute
/// is skipped.
pub fn parse_response(body: &[u8]) -> Result<IppResponse, EscposError> {
    let mut r = Reader { buf: body, pos: 0 };
    let _version = r.take(2)?;
    let status = r.u16()?;
    let request_id = r.u32()?;

    let mut response = IppResponse {
        status,
        request_id,
        job_id: None,
        status_message: None,
    };

    let mut current_name = String::new();
    loop {
        let tag = r.u8()?;
        if tag == TAG_END_OF_ATTRIBUTES {
            break;
        }
        if tag <= 0x0F {
            // Start of another attribute group
            continue;
        }

        let name_len = r.u16()? as usize;
        if name_len > 0 {
            current_name = String::from_utf8_lossy(r.take(name_len)?).into_owned();
        }
        let value_len = r.u16()? as usize;
        let value = r.take(value_len)?;

        match (current_name.as_str(), tag) {
            ("job-id", TAG_INTEGER) if value.len() == 4 => {
                response.job_id = Some(i32::from_be_bytes([value[0], value[1], value[2], value[3]]));
            }
            ("status-message", TAG_TEXT) => {
                response.status_message = Some(String::from_utf8_lossy(value).into_owned());
            }
            _ => {}
        }
    }

    Ok(response)
}

// ============================================================================
// CLIENT
// ============================================================================

/// # IPP client
///
/// ## Example
///
/// ```no_run
/// use escpos_press::Escpos;
/// use escpos_press::transport::{Document, IppClient, IppConfig, JobSubmitter};
///
/// # async fn run() -> Result<(), escpos_press::EscposError> {
/// let mut p = Escpos::buffer();
/// p.init().writeln("hello").cut();
///
/// let client = IppClient::new(IppConfig {
///     printer: "receipts".into(),
///     ..Default::default()
/// })?;
/// let job = client.submit(&Document::new(p.into_bytes(), "hello")).await?;
/// println!("Submitted {}", job);
/// # Ok(())
/// # }
/// ```
pub struct IppClient {
    config: IppConfig,
    http: reqwest::Client,
    next_request_id: AtomicU32,
}

impl IppClient {
    pub fn new(config: IppConfig) -> Result<Self, EscposError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("escpos-press/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| EscposError::Transport(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            config,
            http,
            next_request_id: AtomicU32::new(1),
        })
    }
}

#[async_trait]
impl JobSubmitter for IppClient {
    async fn submit(&self, document: &Document) -> Result<JobHandle, EscposError> {
        let url = self.config.endpoint_url();
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let body = encode_print_job(&self.config, request_id, document)?;

        log::debug!(
            "posting Print-Job #{} ({} byte document) to {}",
            request_id,
            document.size(),
            url
        );

        let mut request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, MIME_IPP)
            .body(body);
        if !self.config.user.is_empty() {
            request = request.basic_auth(&self.config.user, Some(&self.config.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| EscposError::Transport(format!("Failed to reach {}: {}", url, e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                return Err(EscposError::Transport(format!(
                    "Authentication failed for {}",
                    url
                )));
            }
            StatusCode::NOT_FOUND => {
                return Err(EscposError::Transport(format!(
                    "Unknown printer queue '{}' on {}",
                    self.config.printer, self.config.host
                )));
            }
            status if !status.is_success() => {
                return Err(EscposError::Transport(format!("HTTP {} from {}", status, url)));
            }
            _ => {}
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EscposError::Transport(format!("Failed to read response: {}", e)))?;
        let parsed = parse_response(&bytes)?;

        if !parsed.is_success() {
            let message = parsed
                .status_message
                .unwrap_or_else(|| status_name(parsed.status).to_string());
            return Err(EscposError::Ipp {
                status: parsed.status,
                message,
            });
        }

        let job_id = parsed.job_id.ok_or_else(|| {
            EscposError::Transport("IPP response carried no job-id".to_string())
        })?;
        log::info!("{} accepted job {} ('{}')", url, job_id, document.name);
        Ok(JobHandle::Ipp { job_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IppConfig {
        IppConfig {
            host: "printhost".into(),
            printer: "tm88".into(),
            ..Default::default()
        }
    }

    /// Build a response body by hand.
    fn response(status: u16, attrs: &[(u8, &str, &[u8])]) -> Vec<u8> {
        let mut buf = vec![1, 1];
        buf.extend_from_slice(&status.to_be_bytes());
        buf.extend_from_slice(&7u32.to_be_bytes());
        buf.push(TAG_OPERATION_ATTRIBUTES);
        put_attribute(&mut buf, TAG_CHARSET, "attributes-charset", b"utf-8").unwrap();
        buf.push(0x02); // job-attributes-tag
        for (tag, name, value) in attrs {
            put_attribute(&mut buf, *tag, name, value).unwrap();
        }
        buf.push(TAG_END_OF_ATTRIBUTES);
        buf
    }

    #[test]
    fn test_urls() {
        let mut cfg = config();
        assert_eq!(cfg.printer_uri(), "ipp://printhost:631/printers/tm88");
        assert_eq!(cfg.endpoint_url(), "https://printhost:631/printers/tm88");
        cfg.tls = false;
        cfg.port = 8631;
        assert_eq!(cfg.endpoint_url(), "http://printhost:8631/printers/tm88");
    }

    #[test]
    fn test_encode_header() {
        let doc = Document::new(vec![0x1B, 0x40], "job");
        let body = encode_print_job(&config(), 0x01020304, &doc).unwrap();
        assert_eq!(&body[0..8], &[1, 1, 0, 2, 1, 2, 3, 4]);
        assert_eq!(body[8], TAG_OPERATION_ATTRIBUTES);
        // Document follows the end-of-attributes tag
        assert_eq!(&body[body.len() - 3..], &[TAG_END_OF_ATTRIBUTES, 0x1B, 0x40]);
    }

    #[test]
    fn test_encode_attributes() {
        let doc = Document::new(Vec::new(), "asciitable");
        let body = encode_print_job(&config(), 1, &doc).unwrap();

        let mut expected = Vec::new();
        put_attribute(&mut expected, TAG_CHARSET, "attributes-charset", b"utf-8").unwrap();
        assert_eq!(&body[9..9 + expected.len()], &expected[..]);

        let needles: [&[u8]; 4] = [
            b"ipp://printhost:631/printers/tm88",
            b"requesting-user-name\x00\x09anonymous",
            b"job-name\x00\x0aasciitable",
            b"document-format\x00\x18application/octet-stream",
        ];
        for needle in needles {
            assert!(
                body.windows(needle.len()).any(|w| w == needle),
                "{}",
                String::from_utf8_lossy(needle)
            );
        }
    }

    #[test]
    fn test_encode_user_name() {
        let cfg = IppConfig {
            user: "alice".into(),
            ..config()
        };
        let body = encode_print_job(&cfg, 1, &Document::new(Vec::new(), "j")).unwrap();
        assert!(body.windows(5).any(|w| w == b"alice"));
    }

    #[test]
    fn test_encode_rejects_oversized_job_name() {
        let doc = Document::new(vec![0x1B, 0x40], "j".repeat(70_000));
        let err = encode_print_job(&config(), 1, &doc).unwrap_err();
        assert!(matches!(err, EscposError::Transport(ref msg) if msg.contains("job-name")));

        let doc = Document::new(Vec::new(), "j".repeat(usize::from(u16::MAX)));
        assert!(encode_print_job(&config(), 1, &doc).is_ok());
    }

    #[test]
    fn test_parse_success() {
        let body = response(
            0x0000,
            &[
                (TAG_INTEGER, "job-id", &42i32.to_be_bytes()[..]),
                (0x23, "job-state", &3i32.to_be_bytes()[..]),
            ],
        );
        let parsed = parse_response(&body).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.request_id, 7);
        assert_eq!(parsed.job_id, Some(42));
        assert_eq!(parsed.status_message, None);
    }

    #[test]
    fn test_parse_error_status() {
        let body = response(
            0x0406,
            &[(TAG_TEXT, "status-message", &b"The printer does not exist"[..])],
        );
        let parsed = parse_response(&body).unwrap();
        assert!(!parsed.is_success());
        assert_eq!(status_name(parsed.status), "client-error-not-found");
        assert_eq!(
            parsed.status_message.as_deref(),
            Some("The printer does not exist")
        );
    }

    #[test]
    fn test_parse_additional_values() {
        // A value with an empty name continues the previous attribute
        let mut body = response(0x0000, &[(TAG_INTEGER, "job-id", &5i32.to_be_bytes()[..])]);
        body.pop();
        put_attribute(&mut body, 0x44, "job-state-reasons", b"none").unwrap();
        put_attribute(&mut body, 0x44, "", b"job-incoming").unwrap();
        body.push(TAG_END_OF_ATTRIBUTES);

        assert_eq!(parse_response(&body).unwrap().job_id, Some(5));
    }

    #[test]
    fn test_parse_truncated() {
        let body = response(0x0000, &[(TAG_INTEGER, "job-id", &1i32.to_be_bytes()[..])]);
        let err = parse_response(&body[..body.len() - 4]).unwrap_err();
        assert!(matches!(err, EscposError::Transport(_)));
        assert!(parse_response(&[1, 1, 0]).is_err());
    }
}
