//! Pictures: format detection and pixel metrics.
//!
//! Placement geometry is only computed from the picture itself when the
//! caller gives no explicit size; the measuring is delegated to an
//! [`ImageMetrics`] implementation.

use crate::common::unit::{DEFAULT_DPI, px_to_emu};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::{DocumentModel, Lifecycle, OfficePackage};
use serde::Deserialize;

/// Image format types that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpeg => ct::JPEG,
            Self::Gif => ct::GIF,
            Self::Bmp => ct::BMP,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    /// Detect image format from magic numbers.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF8") {
            Some(Self::Gif)
        } else if bytes.starts_with(b"BM") {
            Some(Self::Bmp)
        } else {
            None
        }
    }
}

/// Pixel dimensions of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// Measures pictures.
pub trait ImageMetrics {
    fn dimensions(&self, bytes: &[u8]) -> Result<PixelSize>;
}

/// [`ImageMetrics`] backed by the `image` crate's header decoders.
#[cfg(feature = "image-metrics")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateMetrics;

#[cfg(feature = "image-metrics")]
impl ImageMetrics for ImageCrateMetrics {
    fn dimensions(&self, bytes: &[u8]) -> Result<PixelSize> {
        let (width, height) = image::ImageReader::new(std::io::Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| OoxmlError::Image(e.to_string()))?
            .into_dimensions()
            .map_err(|e| OoxmlError::Image(e.to_string()))?;
        Ok(PixelSize { width, height })
    }
}

/// Stand-in when no metrics backend is compiled in; always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImageMetrics;

impl ImageMetrics for NoImageMetrics {
    fn dimensions(&self, _bytes: &[u8]) -> Result<PixelSize> {
        Err(OoxmlError::Image(
            "no image metrics backend; give the picture an explicit size".to_string(),
        ))
    }
}

/// The metrics backend used unless the caller installs another one.
pub fn default_metrics() -> Box<dyn ImageMetrics> {
    #[cfg(feature = "image-metrics")]
    {
        Box::new(ImageCrateMetrics)
    }
    #[cfg(not(feature = "image-metrics"))]
    {
        Box::new(NoImageMetrics)
    }
}

/// Placement of a picture. Sizes are in EMU.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOptions {
    pub x: i64,
    pub y: i64,
    pub width: Option<i64>,
    pub height: Option<i64>,
    /// Alternative text
    pub description: Option<String>,
}

impl ImageOptions {
    pub fn sized(width: i64, height: i64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// A picture ready to be stored in the package.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub format: ImageFormat,
    pub cx: i64,
    pub cy: i64,
}

/// Determine format and placement size of a picture.
///
/// A single explicit dimension keeps the picture's aspect ratio.
pub fn resolve_image(
    bytes: &[u8],
    options: &ImageOptions,
    metrics: &dyn ImageMetrics,
) -> Result<ResolvedImage> {
    let format = ImageFormat::detect_from_bytes(bytes)
        .ok_or_else(|| OoxmlError::Image("unrecognized image format".to_string()))?;

    let (cx, cy) = match (options.width, options.height) {
        (Some(w), Some(h)) => (w, h),
        (w, h) => {
            let px = metrics.dimensions(bytes)?;
            if px.width == 0 || px.height == 0 {
                return Err(OoxmlError::Image(format!(
                    "image reports zero size {}x{}",
                    px.width, px.height
                )));
            }
            let natural = (px_to_emu(px.width, DEFAULT_DPI), px_to_emu(px.height, DEFAULT_DPI));
            match (w, h) {
                (Some(w), None) => (w, w * natural.1 / natural.0),
                (None, Some(h)) => (h * natural.0 / natural.1, h),
                _ => natural,
            }
        },
    };

    Ok(ResolvedImage { format, cx, cy })
}

/// Store picture `number` (one-based) under `prefix` (`/word`, `/ppt`).
///
/// Returns the part name of the media part.
pub fn register_media<D: DocumentModel + 'static>(
    package: &mut OfficePackage<D>,
    prefix: &str,
    number: usize,
    format: ImageFormat,
    bytes: Vec<u8>,
) -> Result<String> {
    let partname = format!("{}/media/image{}.{}", prefix, number, format.extension());
    package.register_blob(&partname, format.mime_type(), Lifecycle::Data, bytes)?;
    Ok(partname)
}
