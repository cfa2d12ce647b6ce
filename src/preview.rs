// Renderers for the inline image pane, the gallery and the PDF route

use image::{DynamicImage, GenericImageView, Pixel};
use pdfium_render::prelude::*;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Pixel box for the inline image pane.
/// Height is halved on screen because each terminal row holds 2 pixels.
pub const INLINE_BOUNDS: Bounds = Bounds {
    width: 160,
    height: 100,
};

/// Pixel box for the gallery at zoom level 1
pub const GALLERY_BOUNDS: Bounds = Bounds {
    width: 200,
    height: 120,
};

/// Pixel box for one PDF page
pub const PDF_PAGE_BOUNDS: Bounds = Bounds {
    width: 160,
    height: 110,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn scaled(self, factor: u32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Rendered output for a viewer pane
#[derive(Debug, Clone)]
pub enum PreviewContent {
    /// Plain text lines (renderer unavailable, help text)
    Text(Vec<String>),
    /// Styled half-block lines (images and PDF pages)
    Styled(Vec<Line<'static>>),
}

impl PreviewContent {
    pub fn into_lines(self) -> Vec<Line<'static>> {
        match self {
            PreviewContent::Text(text) => text.into_iter().map(Line::from).collect(),
            PreviewContent::Styled(lines) => lines,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PreviewState {
    Ready(PreviewContent),
    Error(String),
}

/// One rendered page of a PDF
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub index: u16,
    pub page_count: u16,
    pub content: PreviewContent,
}

/// Loads an image from a file path
pub fn load_image(path: &Path) -> io::Result<DynamicImage> {
    image::open(path).map_err(|e| io::Error::other(format!("Image loading error: {}", e)))
}

/// Fits `original` inside `max` preserving aspect ratio, never upscaling
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;
    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        (original_width, original_height)
    } else {
        let new_width = (original_width as f64 * ratio) as u32;
        let new_height = (original_height as f64 * ratio) as u32;
        (new_width, new_height)
    }
}

/// Converts an image to styled lines of upper half blocks (▀): foreground is
/// the upper pixel, background the lower one, so each cell shows 2 pixels.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let height = if height.is_multiple_of(2) {
        height
    } else {
        height + 1
    };

    // Triangle keeps large photos fast enough for interactive use
    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let term_height = height / 2;
    let mut lines = Vec::with_capacity(term_height as usize);

    for y in 0..term_height {
        let upper_y = y * 2;
        let lower_y = upper_y + 1;
        let mut spans = Vec::with_capacity(width as usize);

        for x in 0..width {
            let upper = img.get_pixel(x, upper_y).to_rgb();
            let lower = if lower_y < height {
                img.get_pixel(x, lower_y).to_rgb()
            } else {
                upper
            };

            let style = Style::default()
                .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                .bg(Color::Rgb(lower[0], lower[1], lower[2]));
            spans.push(Span::styled("▀", style));
        }

        lines.push(Line::from(spans));
    }

    lines
}

fn fit_to_lines(img: &DynamicImage, bounds: Bounds) -> Vec<Line<'static>> {
    let (original_width, original_height) = img.dimensions();
    let (width, height) =
        calculate_resize_dimensions(original_width, original_height, bounds.width, bounds.height);
    image_to_halfblock_lines(img, width, height)
}

/// Renders an image file to fit inside `bounds`
pub fn render_image(path: &Path, bounds: Bounds) -> io::Result<PreviewContent> {
    let img = load_image(path)?;
    Ok(PreviewContent::Styled(fit_to_lines(&img, bounds)))
}

/// Attempts to bind Pdfium without panicking: system library first, then
/// `./lib/` and the current directory
fn try_create_pdfium() -> Option<Pdfium> {
    if let Ok(bindings) = Pdfium::bind_to_system_library() {
        return Some(Pdfium::new(bindings));
    }

    for dir in ["./lib/", "./"] {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
        {
            return Some(Pdfium::new(bindings));
        }
    }

    None
}

/// Renders page `index` of the PDF at `path`, clamped to the last page
pub fn render_pdf_page(path: &Path, index: u16, bounds: Bounds) -> io::Result<PdfPage> {
    let pdfium = try_create_pdfium().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Unsupported, "Pdfium library not available")
    })?;

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| io::Error::other(format!("PDF loading error: {}", e)))?;

    let page_count = document.pages().len();
    if page_count == 0 {
        return Ok(PdfPage {
            index: 0,
            page_count,
            content: PreviewContent::Text(vec!["[This PDF has no pages]".to_string()]),
        });
    }
    let index = index.min(page_count - 1);

    let page = document
        .pages()
        .get(index)
        .map_err(|e| io::Error::other(format!("PDF page access error: {}", e)))?;

    let render_config = PdfRenderConfig::new()
        .set_target_width(1024)
        .set_maximum_height(1024);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| io::Error::other(format!("PDF rendering error: {}", e)))?;

    let img = bitmap_to_image(
        bitmap.width() as u32,
        bitmap.height() as u32,
        &bitmap.as_raw_bytes(),
    )?;

    Ok(PdfPage {
        index,
        page_count,
        content: PreviewContent::Styled(fit_to_lines(&img, bounds)),
    })
}

/// Builds an RGBA image from a Pdfium bitmap, dropping any row padding
fn bitmap_to_image(width: u32, height: u32, raw: &[u8]) -> io::Result<DynamicImage> {
    if height == 0 {
        return Err(io::Error::other("PDF page rendered with zero height"));
    }

    let stride = raw.len() / (height as usize);
    let row_bytes = (width as usize) * 4;

    let buffer = if stride > row_bytes {
        let mut clean = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * stride;
            let end = start + row_bytes;
            if end <= raw.len() {
                clean.extend_from_slice(&raw[start..end]);
            }
        }
        clean
    } else {
        raw.to_vec()
    };

    image::RgbaImage::from_vec(width, height, buffer)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| {
            io::Error::other(format!(
                "PDF bitmap of {} bytes does not match {}x{}",
                raw.len(),
                width,
                height
            ))
        })
}

/// Shown in place of an image that failed to render
pub const IMAGE_UNAVAILABLE: &str = "This image could not be displayed.";
/// Shown in place of a PDF page that failed to render
pub const PDF_UNAVAILABLE: &str = "This PDF could not be displayed.";
/// Shown when no Pdfium library could be bound
pub const PDF_RENDERER_MISSING: &str =
    "PDF pages cannot be shown here because the Pdfium library is not installed.";

/// Renders an image off the async runtime's thread
pub async fn render_image_blocking(path: PathBuf, bounds: Bounds) -> PreviewState {
    match tokio::task::spawn_blocking(move || render_image(&path, bounds)).await {
        Ok(Ok(content)) => PreviewState::Ready(content),
        Ok(Err(e)) => {
            warn!(error = %e, "image could not be rendered");
            PreviewState::Error(IMAGE_UNAVAILABLE.to_string())
        }
        Err(e) => {
            warn!(error = %e, "image renderer task failed");
            PreviewState::Error(IMAGE_UNAVAILABLE.to_string())
        }
    }
}

/// Renders a PDF page off the async runtime's thread. The error is a
/// sentence fit for the screen; the renderer's own error goes to the log.
pub async fn render_pdf_page_blocking(
    path: PathBuf,
    index: u16,
    bounds: Bounds,
) -> Result<PdfPage, String> {
    match tokio::task::spawn_blocking(move || render_pdf_page(&path, index, bounds)).await {
        Ok(Ok(page)) => Ok(page),
        Ok(Err(e)) if e.kind() == io::ErrorKind::Unsupported => {
            warn!(error = %e, "no PDF renderer");
            Err(PDF_RENDERER_MISSING.to_string())
        }
        Ok(Err(e)) => {
            warn!(page = index, error = %e, "PDF page could not be rendered");
            Err(PDF_UNAVAILABLE.to_string())
        }
        Err(e) => {
            warn!(error = %e, "PDF renderer task failed");
            Err(PDF_UNAVAILABLE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, _| Rgb([(x % 255) as u8, 80, 160]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_calculate_resize_dimensions_scale_down() {
        assert_eq!(calculate_resize_dimensions(1600, 1000, 160, 100), (160, 100));
        assert_eq!(calculate_resize_dimensions(3200, 1000, 160, 100), (160, 50));
    }

    #[test]
    fn test_calculate_resize_dimensions_no_upscale() {
        assert_eq!(calculate_resize_dimensions(40, 20, 160, 100), (40, 20));
    }

    #[test]
    fn test_calculate_resize_dimensions_zero() {
        assert_eq!(calculate_resize_dimensions(0, 100, 160, 100), (0, 0));
    }

    #[test]
    fn test_halfblock_rows_are_half_the_height() {
        let img = DynamicImage::new_rgb8(10, 10);
        let lines = image_to_halfblock_lines(&img, 10, 10);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].spans.len(), 10);
    }

    #[test]
    fn test_halfblock_odd_height_rounds_up() {
        let img = DynamicImage::new_rgb8(4, 5);
        assert_eq!(image_to_halfblock_lines(&img, 4, 5).len(), 3);
    }

    #[test]
    fn test_render_image_fits_bounds() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_png(temp_dir.path(), "wide.png", 320, 100);

        let content = render_image(&path, INLINE_BOUNDS).unwrap();
        match content {
            PreviewContent::Styled(lines) => {
                assert_eq!(lines.len(), 25);
                assert_eq!(lines[0].spans.len(), 160);
            }
            PreviewContent::Text(_) => panic!("Expected styled image lines"),
        }
    }

    #[test]
    fn test_render_image_rejects_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(render_image(&path, INLINE_BOUNDS).is_err());
    }

    #[test]
    fn test_bitmap_to_image_strips_padding() {
        // 2x2 RGBA with 4 bytes of padding per row
        let raw = vec![255u8; (2 * 4 + 4) * 2];
        let img = bitmap_to_image(2, 2, &raw).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
    }

    #[test]
    fn test_bitmap_to_image_size_mismatch() {
        assert!(bitmap_to_image(4, 4, &[0u8; 10]).is_err());
    }

    #[test]
    fn test_render_pdf_page_missing_file() {
        assert!(render_pdf_page(Path::new("/nonexistent/a.pdf"), 0, PDF_PAGE_BOUNDS).is_err());
    }

    #[tokio::test]
    async fn test_render_image_blocking_reports_errors() {
        let state = render_image_blocking(PathBuf::from("/nonexistent/a.png"), INLINE_BOUNDS).await;
        assert!(matches!(state, PreviewState::Error(message) if message == IMAGE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_render_pdf_page_blocking_hides_renderer_detail() {
        let message = render_pdf_page_blocking(
            PathBuf::from("/nonexistent/a.pdf"),
            0,
            PDF_PAGE_BOUNDS,
        )
        .await
        .unwrap_err();

        assert!(message == PDF_UNAVAILABLE || message == PDF_RENDERER_MISSING);
        assert!(!message.contains("/nonexistent"));
    }

    #[test]
    fn test_bounds_scaled() {
        assert_eq!(
            GALLERY_BOUNDS.scaled(2),
            Bounds {
                width: 400,
                height: 240
            }
        );
    }
}
