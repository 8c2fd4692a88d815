//! Grid image rendering, file output and file path generation

use image::imageops::FilterType;
use image::{ImageFormat, Rgb, RgbImage};
use std::io;
use std::path::{Path, PathBuf};

use crate::grid::{Grid, GRID_SIDE};
use crate::palette::PaletteRegistry;

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// Requested layout exceeds [`MAX_IMAGE_SIDE`]
    TooLarge,
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::TooLarge => {
                write!(f, "Image would exceed {} pixels per side", MAX_IMAGE_SIDE)
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::TooLarge => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Largest edge of an exported image, in pixels after scaling.
pub const MAX_IMAGE_SIDE: u32 = 8192;

/// Edge length of a rendered grid, or `None` if it overflows `u32`.
pub fn image_side(cell_size: u32, gap: u32, padding: u32) -> Option<u32> {
    let side = GRID_SIDE as u32;
    padding
        .checked_mul(2)?
        .checked_add(cell_size.checked_mul(side)?)?
        .checked_add(gap.checked_mul(side - 1)?)
}

/// Raster format of an exported grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Parse a format name or file extension (`png`, `jpg`, `jpeg`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|e| e.to_str()).and_then(Self::from_name)
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Layout of a rendered grid, in pixels before scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub cell_size: u32,
    pub gap: u32,
    pub padding: u32,
    pub background: Rgb<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 64,
            gap: 8,
            padding: 20,
            background: Rgb([255, 255, 255]),
        }
    }
}

impl RenderOptions {
    /// Width (and height) of the rendered image, if it fits in `u32`.
    pub fn image_size(&self) -> Option<u32> {
        image_side(self.cell_size, self.gap, self.padding)
    }

    /// Edge length after scaling, or `None` when above [`MAX_IMAGE_SIDE`].
    pub fn scaled_size(&self, scale: u8) -> Option<u32> {
        self.image_size()?
            .checked_mul(u32::from(scale.max(1)))
            .filter(|&side| side <= MAX_IMAGE_SIDE)
    }
}

/// Render a grid as solid color cells on a background.
///
/// Unknown codes are drawn in the palette's fallback gray. Layouts larger than
/// [`MAX_IMAGE_SIDE`] are rejected before any pixel buffer is allocated.
pub fn render_grid(
    grid: &Grid,
    palette: &PaletteRegistry,
    options: &RenderOptions,
) -> Result<RgbImage, OutputError> {
    let size = options.scaled_size(1).ok_or(OutputError::TooLarge)?;
    let mut image = RgbImage::from_pixel(size, size, options.background);
    let stride = options.cell_size + options.gap;
    let colors = palette.lookup_all(grid.cells());

    for (row_index, row) in colors.chunks(GRID_SIDE).enumerate() {
        for (col_index, &color) in row.iter().enumerate() {
            let x0 = options.padding + col_index as u32 * stride;
            let y0 = options.padding + row_index as u32 * stride;
            for y in y0..y0 + options.cell_size {
                for x in x0..x0 + options.cell_size {
                    image.put_pixel(x, y, color);
                }
            }
        }
    }

    Ok(image)
}

/// Save an image, choosing the encoder from `format`.
///
/// Parent directories are created when missing.
pub fn save_image(image: &RgbImage, path: &Path, format: ExportFormat) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, format.image_format())?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Cell edges stay crisp. A factor of 1 returns the image unchanged.
pub fn scale_image(image: RgbImage, factor: u8) -> RgbImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    let new_w = w * factor as u32;
    let new_h = h * factor as u32;
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}

/// Render, scale and save a grid in one step.
pub fn export_grid(
    grid: &Grid,
    palette: &PaletteRegistry,
    options: &RenderOptions,
    scale: u8,
    path: &Path,
    format: ExportFormat,
) -> Result<(), OutputError> {
    options.scaled_size(scale).ok_or(OutputError::TooLarge)?;
    let image = scale_image(render_grid(grid, palette, options)?, scale);
    save_image(&image, path, format)
}

/// File name for an exported grid: `grid-{label}.{ext}`.
///
/// Characters that are not safe in file names on common filesystems are
/// replaced with `_`. An empty label becomes `custom`.
pub fn export_file_name(label: &str, format: ExportFormat) -> String {
    let sanitized: String = label
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = if sanitized.is_empty() {
        "custom"
    } else {
        sanitized.as_str()
    };
    format!("grid-{}.{}", stem, format.extension())
}

/// Generate the output path for an exported grid.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{default_dir}/grid-{label}.{ext}` |
/// | `-o dir/` or existing directory | `dir/grid-{label}.{ext}` |
/// | `-o file.png` | `file.png` |
pub fn generate_output_path(
    label: &str,
    output_arg: Option<&Path>,
    default_dir: &Path,
    format: ExportFormat,
) -> PathBuf {
    let file_name = export_file_name(label, format);
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            if default_dir.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                default_dir.join(file_name)
            }
        }
    }
}
