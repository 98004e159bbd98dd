//! Image loading: the source bitmap for a grid
//!
//! Decoding goes through the `image` crate. Every decoded image is flattened
//! to 8-bit RGB; alpha is dropped because the grid has no notion of
//! transparency.
//!
//! The pipeline only needs [`Bitmap`], so any decoder can be plugged in by
//! implementing [`ImageSource`].

use image::{DynamicImage, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;

use crate::color::RgbTriple;
use crate::error::{GridError, Result};

/// True if `path` ends in an extension listed by [`supported_extensions`]
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_supported_extension)
}

/// Decoded source image as a grid of RGB triples
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbImage,
}

impl Bitmap {
    /// Wrap an already decoded RGB buffer
    pub fn from_rgb_image(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Build a bitmap from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either side is zero or the pixel count
    /// does not match `width * height`
    pub fn from_pixels(width: u32, height: u32, pixels: &[RgbTriple]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::invalid_parameter(
                "bitmap size",
                format!("{}x{}", width, height),
            ));
        }
        if pixels.len() as u64 != width as u64 * height as u64 {
            return Err(GridError::invalid_parameter("pixel count", pixels.len()));
        }

        let raw: Vec<u8> = pixels.iter().flat_map(|p| p.channels()).collect();
        let buffer = RgbImage::from_raw(width, height, raw).ok_or_else(|| {
            GridError::invalid_parameter("pixel count", pixels.len())
        })?;
        Ok(Self::from_rgb_image(buffer))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel at column `x`, row `y`. Both must be inside the bitmap.
    pub fn get_pixel(&self, x: u32, y: u32) -> RgbTriple {
        RgbTriple::from(*self.pixels.get_pixel(x, y))
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.pixels
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(img: DynamicImage) -> Self {
        Self::from_rgb_image(img.to_rgb8())
    }
}

/// Turns encoded image bytes into a [`Bitmap`]
pub trait ImageSource {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap>;
}

/// [`ImageSource`] backed by the `image` crate, format sniffed from content
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateSource;

impl ImageSource for ImageCrateSource {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| GridError::image_load("Failed to read image bytes", e))?;

        if reader.format().is_none() {
            return Err(GridError::ImageLoadError {
                message: "Unrecognised image data".to_string(),
                source: None,
            });
        }

        let img = reader
            .decode()
            .map_err(|e| GridError::image_load("Failed to decode image", e))?;
        Ok(Bitmap::from(img))
    }
}

/// Decode an in-memory image (e.g. an uploaded file)
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap> {
    ImageCrateSource.decode(bytes)
}

/// Load an image from disk
///
/// # Errors
///
/// Returns `UnsupportedFormat` for unknown extensions and `ImageLoadError`
/// if the file cannot be opened or decoded
///
/// # Example
///
/// ```rust,no_run
/// use gem_template::image_loader::load_image;
/// use std::path::Path;
///
/// let bitmap = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", bitmap.width(), bitmap.height());
/// # Ok::<(), gem_template::GridError>(())
/// ```
pub fn load_image(path: &Path) -> Result<Bitmap> {
    if !has_supported_extension(path) {
        return Err(GridError::UnsupportedFormat {
            path: path.display().to_string(),
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        GridError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        GridError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "loaded source image"
    );
    Ok(Bitmap::from(img))
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm",
        "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_extension_detection() {
        assert!(has_supported_extension(Path::new("photo.jpg")));
        assert!(has_supported_extension(Path::new("photo.JPEG")));
        assert!(has_supported_extension(Path::new("photo.png")));
        assert!(has_supported_extension(Path::new("dir.v2/photo.webp")));
        assert!(!has_supported_extension(Path::new("photo.xyz")));
        assert!(!has_supported_extension(Path::new("photo")));
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(!is_supported_extension("heic"));
        assert!(!is_supported_extension("doc"));
    }

    #[test]
    fn test_decode_png_bytes() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 0, 255]));

        let bitmap = decode_image(&png_bytes(&img)).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (2, 1));
        assert_eq!(bitmap.get_pixel(0, 0), RgbTriple::new(255, 0, 0));
        assert_eq!(bitmap.get_pixel(1, 0), RgbTriple::new(0, 0, 255));
    }

    #[test]
    fn test_decode_garbage_is_load_error() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(GridError::ImageLoadError { .. })));
    }

    #[test]
    fn test_truncated_png_is_load_error() {
        let bytes = png_bytes(&RgbImage::from_pixel(8, 8, image::Rgb([9, 9, 9])));
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(GridError::ImageLoadError { .. })));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba = image::RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 0]));
        let bitmap = Bitmap::from(DynamicImage::ImageRgba8(rgba));
        assert_eq!(bitmap.get_pixel(0, 0), RgbTriple::new(10, 20, 30));
    }

    #[test]
    fn test_from_pixels() {
        let pixels = [
            RgbTriple::new(1, 2, 3),
            RgbTriple::new(4, 5, 6),
            RgbTriple::new(7, 8, 9),
            RgbTriple::new(10, 11, 12),
        ];
        let bitmap = Bitmap::from_pixels(2, 2, &pixels).unwrap();
        assert_eq!(bitmap.get_pixel(1, 0), RgbTriple::new(4, 5, 6));
        assert_eq!(bitmap.get_pixel(0, 1), RgbTriple::new(7, 8, 9));

        assert!(Bitmap::from_pixels(3, 2, &pixels).is_err());
        assert!(Bitmap::from_pixels(0, 2, &[]).is_err());
    }

    #[test]
    fn test_load_unknown_extension() {
        let result = load_image(Path::new("template.doc"));
        assert!(matches!(result, Err(GridError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("nonexistent_file.png"));
        assert!(matches!(result, Err(GridError::ImageLoadError { .. })));
    }
}
