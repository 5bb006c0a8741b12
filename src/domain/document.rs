use super::{DocumentFingerprint, DocumentId};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
    pub fingerprint: DocumentFingerprint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" | "application/x-pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Browsers often send `application/octet-stream` for PDFs, so the
    /// extension is accepted as a fallback.
    pub fn detect(mime: Option<&str>, filename: &str) -> Option<Self> {
        mime.and_then(Self::from_mime).or_else(|| {
            filename
                .rsplit_once('.')
                .filter(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
                .map(|_| Self::Pdf)
        })
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, data: &[u8]) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes: data.len() as u64,
            fingerprint: DocumentFingerprint::of(data),
        }
    }
}
