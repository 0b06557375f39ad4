use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file as it arrives from a picker, a drop or a multipart form.
#[derive(Debug, Clone, Default)]
pub struct SelectedFile {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            name: None,
            content_type: None,
            bytes,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk without blocking the runtime.
    pub async fn read(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mut file = Self::new(bytes);
        if let Some(name) = path.file_name() {
            file.name = Some(name.to_string_lossy().into_owned());
        }
        Ok(file)
    }

    /// MIME type for the data URL: the declared type when usable, then
    /// magic-byte sniffing, then a generic binary type.
    pub fn mime_type(&self) -> String {
        if let Some(declared) = self.content_type.as_deref() {
            let declared = declared.trim();
            if !declared.is_empty() && !declared.contains(|c: char| c == ';' || c == ',' || c.is_whitespace()) {
                return declared.to_string();
            }
        }
        image::guess_format(&self.bytes)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| FALLBACK_MIME.to_string())
    }

    pub fn into_data_url(self) -> DataUrl {
        DataUrl::encode(&self.mime_type(), &self.bytes)
    }
}

/// `data:<mime>;base64,<payload>`, the form images are previewed and posted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or(FALLBACK_MIME)
    }

    /// Length of the encoded URL, not of the decoded file.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
