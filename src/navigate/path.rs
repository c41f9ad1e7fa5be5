//! Virtual path parsing
//!
//! A virtual path names a folder in the tree. Its textual form always starts
//! with [`ROOT_PREFIX`] and ends with `/`, e.g. `/files/Loli/`.

use std::fmt;

use crate::error::NavigateError;

/// Prefix every virtual path must start with
pub const ROOT_PREFIX: &str = "/files/";

/// Parsed virtual folder path, stored as the folder names below the root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VirtualPath {
    segments: Vec<String>,
}

impl VirtualPath {
    /// The root folder (`/files/`)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a raw folder path.
    ///
    /// Anything not under [`ROOT_PREFIX`] is `OutsideRoot`. A path that stops
    /// in the middle of a segment (no trailing `/`) or contains an empty
    /// segment is `NotFound`.
    pub fn parse(raw: &str) -> Result<Self, NavigateError> {
        let rest = raw
            .strip_prefix(ROOT_PREFIX)
            .ok_or_else(|| NavigateError::OutsideRoot(raw.to_string()))?;

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let body = rest
            .strip_suffix('/')
            .ok_or_else(|| NavigateError::NotFound(raw.to_string()))?;

        let segments: Vec<String> = body.split('/').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(NavigateError::NotFound(raw.to_string()));
        }

        Ok(Self { segments })
    }

    /// Parses a percent-encoded request path, decoding each segment on its
    /// own. An encoded `/` inside a segment never becomes a separator; such a
    /// segment cannot name a folder and is `NotFound`, as is one that does
    /// not decode to UTF-8.
    pub fn decode(encoded: &str) -> Result<Self, NavigateError> {
        let parsed = Self::parse(encoded)?;
        let mut segments = Vec::with_capacity(parsed.segments.len());
        for segment in &parsed.segments {
            match urlencoding::decode(segment) {
                Ok(decoded) if !decoded.contains('/') => segments.push(decoded.into_owned()),
                _ => return Err(NavigateError::NotFound(encoded.to_string())),
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name of the folder this path points at, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path of the containing folder, `None` for the root
    pub fn parent(&self) -> Option<VirtualPath> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    pub fn child(&self, name: &str) -> VirtualPath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Same depth, last segment replaced. The root is returned unchanged.
    pub fn with_name(&self, name: &str) -> VirtualPath {
        match self.parent() {
            Some(parent) => parent.child(name),
            None => self.clone(),
        }
    }

    /// Key of a file stored directly in this folder (folder path + filename)
    pub fn file_key(&self, filename: &str) -> String {
        format!("{}{}", self, filename)
    }

    /// Percent-encoded form, safe for `Location` headers and links
    pub fn encoded(&self) -> String {
        let mut out = String::from(ROOT_PREFIX);
        for segment in &self.segments {
            out.push_str(&urlencoding::encode(segment));
            out.push('/');
        }
        out
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_PREFIX)?;
        for segment in &self.segments {
            write!(f, "{}/", segment)?;
        }
        Ok(())
    }
}
