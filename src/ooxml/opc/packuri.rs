//! Part names inside a package.
//!
//! A [`PackURI`] is the absolute, slash-rooted name of a part
//! (`/word/document.xml`). The ZIP member name is the same string without
//! the leading slash.

use crate::ooxml::opc::error::{OpcError, Result};

/// Absolute name of a part within a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a part name; it must begin with a slash and name a file.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OpcError::InvalidPackUri(format!(
                "part name must begin with slash, got '{}'",
                uri
            )));
        }
        if uri.len() > 1 && (uri.ends_with('/') || uri.contains("//")) {
            return Err(OpcError::InvalidPackUri(format!(
                "part name has an empty segment: '{}'",
                uri
            )));
        }
        Ok(PackURI { uri })
    }

    /// Directory portion, e.g. `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// File name portion, e.g. `slide1.xml`.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Extension without the period, e.g. `xml`.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// ZIP member name (leading slash stripped).
    pub fn membername(&self) -> &str {
        self.uri.strip_prefix('/').unwrap_or(&self.uri)
    }

    /// Reference to this part relative to `base_uri`.
    ///
    /// `/ppt/slideLayouts/slideLayout1.xml` seen from `/ppt/slides` is
    /// `../slideLayouts/slideLayout1.xml`.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from
            .iter()
            .zip(to.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<&str> = vec![".."; from.len() - common];
        segments.extend_from_slice(&to[common..]);
        segments.join("/")
    }

    /// Name of the relationships part for this part.
    ///
    /// `/word/_rels/document.xml.rels` for `/word/document.xml`, and
    /// `/_rels/.rels` for the package itself.
    pub fn rels_uri(&self) -> Result<PackURI> {
        let rels_filename = format!("{}.rels", self.filename());
        match self.base_uri() {
            "/" => Self::new(format!("/_rels/{}", rels_filename)),
            base => Self::new(format!("{}/_rels/{}", base, rels_filename)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_names() {
        assert!(PackURI::new("word/document.xml").is_err());
        assert!(PackURI::new("/word//document.xml").is_err());
        assert!(PackURI::new("/word/").is_err());
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/ppt/embeddings/Microsoft_Excel_Sheet1.xlsx").unwrap();
        assert_eq!(uri.base_uri(), "/ppt/embeddings");
        assert_eq!(uri.filename(), "Microsoft_Excel_Sheet1.xlsx");
        assert_eq!(uri.ext(), "xlsx");
        assert_eq!(uri.membername(), "ppt/embeddings/Microsoft_Excel_Sheet1.xlsx");
    }

    #[test]
    fn test_relative_ref() {
        let layout = PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap();
        assert_eq!(layout.relative_ref("/ppt/slides"), "../slideLayouts/slideLayout1.xml");

        let chart = PackURI::new("/word/charts/chart1.xml").unwrap();
        assert_eq!(chart.relative_ref("/word"), "charts/chart1.xml");

        let doc = PackURI::new("/word/document.xml").unwrap();
        assert_eq!(doc.relative_ref("/"), "word/document.xml");
    }

    #[test]
    fn test_rels_uri() {
        let doc = PackURI::new("/word/document.xml").unwrap();
        assert_eq!(doc.rels_uri().unwrap().as_str(), "/word/_rels/document.xml.rels");

        let pkg = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(pkg.rels_uri().unwrap().as_str(), "/_rels/.rels");
    }
}
