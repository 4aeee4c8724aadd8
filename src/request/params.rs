use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};

/// Which client a set of parameters is being built for.
///
/// The pooled client streams multipart bodies straight from open file
/// handles, the blocking client wants in-memory files kept apart from the
/// plain form fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClientMode {
    Pooled,
    Sync,
}

/// Everything needed to issue one request. Built fresh per request.
#[derive(Debug)]
pub struct RequestParams {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend(headers.iter().cloned());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug)]
pub enum RequestBody {
    Empty,
    /// Pooled shape: files and text fields in one form.
    Multipart(Vec<FormPart>),
    /// Sync shape: file parts and text fields passed separately.
    FilesAndData {
        files: Vec<FilePart>,
        data: Vec<(String, String)>,
    },
}

#[derive(Debug)]
pub enum FormPart {
    Text { name: String, value: String },
    File(FilePart),
}

#[derive(Debug)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub source: FileSource,
}

#[derive(Debug)]
pub enum FileSource {
    Handle { file: File, len: u64 },
    Bytes(Vec<u8>),
}

impl FilePart {
    /// Opens `path` for streaming. The file is read only when the body is sent.
    pub fn open(name: &str, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let len = file.metadata().map_err(|e| Error::io(path, e))?.len();
        Ok(Self {
            name: name.to_string(),
            file_name: file_name_of(path),
            source: FileSource::Handle { file, len },
        })
    }

    /// Reads all of `path` into memory.
    pub fn read(name: &str, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Ok(Self {
            name: name.to_string(),
            file_name: file_name_of(path),
            source: FileSource::Bytes(bytes),
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
