//! # Printer Transport Layer
//!
//! The encoder only produces bytes. Getting them to a printer is the job of
//! a [`JobSubmitter`]: it takes a finished [`Document`] and returns a
//! [`JobHandle`] or a descriptive failure.
//!
//! ## Available Transports
//!
//! - [`ipp`]: IPP `Print-Job` over HTTP(S), e.g. a CUPS queue
//! - [`raw`]: raw TCP socket (JetDirect-style, port 9100)

pub mod ipp;
pub mod raw;

use std::fmt;

use async_trait::async_trait;

use crate::error::EscposError;

pub use ipp::{IppClient, IppConfig};
pub use raw::{RawClient, RawConfig};

/// MIME type for vendor command streams.
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// A finished print job payload.
#[derive(Debug, Clone)]
pub struct Document {
    pub data: Vec<u8>,
    /// Human-readable job name
    pub name: String,
    pub mime_type: String,
}

impl Document {
    /// Document carrying ESC/POS bytes, typed as an octet stream.
    pub fn new(data: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            data,
            name: name.into(),
            mime_type: MIME_OCTET_STREAM.to_string(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// What a transport hands back for a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobHandle {
    /// Job accepted by an IPP server
    Ipp { job_id: i32 },
    /// Bytes delivered over a raw socket; there is no server-side job
    Raw { bytes: usize },
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobHandle::Ipp { job_id } => write!(f, "job {}", job_id),
            JobHandle::Raw { bytes } => write!(f, "{} bytes sent", bytes),
        }
    }
}

/// Something that can accept a print job.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, document: &Document) -> Result<JobHandle, EscposError>;
}
