//! The saved palette.

use std::{
    io::Cursor,
    path::Path,
};

use image::{
    ImageFormat,
    RgbaImage,
};

use crate::{
    color::Color,
    storage::{
        KeyValueStore,
        StorageError,
    },
};

pub const PALETTE_KEY: &str = "palette";

pub const DEFAULT_EXPORT_FILE_NAME: &str = "palette.png";

/// Largest RGBA buffer an export will allocate, in bytes. Same as the default
/// allocation limit `image` applies when decoding.
pub const MAX_EXPORT_BYTES: u64 = 512 * 1024 * 1024;

/// Size of a single swatch in an exported palette image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwatchSize {
    pub width: u32,
    pub height: u32,
}

impl SwatchSize {
    pub const DEFAULT: Self = Self::new(50, 50);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SwatchSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Palette is empty. Save at least one color.")]
    EmptyPalette,

    #[error("Invalid swatch size: {width}x{height}")]
    InvalidSwatchSize { width: u32, height: u32 },

    #[error("Palette image too large: {count} swatches of {width}x{height} pixels")]
    TooLarge {
        count: usize,
        width: u32,
        height: u32,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Owns the ordered list of saved colors.
///
/// Every mutation writes the whole list to the backing store before it
/// returns. If that write fails, the mutation is undone, so the list in memory
/// always matches what was last stored.
#[derive(Debug)]
pub struct PaletteStore<S> {
    storage: S,
    colors: Vec<Color>,
}

impl<S> PaletteStore<S>
where
    S: KeyValueStore,
{
    /// Reads the saved palette from `storage`.
    ///
    /// A missing or malformed palette loads as empty. Only errors from the
    /// storage backend itself are returned.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let colors = read_palette(&storage)?;
        Ok(Self { storage, colors })
    }

    /// Discards the list in memory and reads it from storage again.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        self.colors = read_palette(&self.storage)?;
        Ok(())
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Access to the backing store, for other keys that share it.
    ///
    /// Writing [`PALETTE_KEY`] through this bypasses the list in memory until
    /// the next [`reload`](Self::reload).
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Appends a color. Duplicates are allowed.
    pub fn add(&mut self, color: Color) -> Result<(), StorageError> {
        self.colors.push(color);

        if let Err(error) = self.persist() {
            self.colors.pop();
            return Err(error);
        }

        tracing::debug!(%color, len = self.colors.len(), "Saved color");
        Ok(())
    }

    /// Removes the color at `index`, keeping the order of the others.
    ///
    /// An out-of-range index is ignored and returns `Ok(None)`.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<Color>, StorageError> {
        if index >= self.colors.len() {
            tracing::warn!(index, len = self.colors.len(), "Swatch index out of range");
            return Ok(None);
        }

        let color = self.colors.remove(index);

        if let Err(error) = self.persist() {
            self.colors.insert(index, color);
            return Err(error);
        }

        tracing::debug!(%color, index, len = self.colors.len(), "Removed color");
        Ok(Some(color))
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        let previous = std::mem::take(&mut self.colors);

        if let Err(error) = self.persist() {
            self.colors = previous;
            return Err(error);
        }

        tracing::debug!(removed = previous.len(), "Cleared palette");
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.colors)?;
        self.storage.set(PALETTE_KEY, &json)
    }

    /// Paints the palette as a row of swatches, left to right in palette
    /// order. See [`paint_swatches`].
    pub fn export_bitmap(&self, size: SwatchSize) -> Result<RgbaImage, ExportError> {
        paint_swatches(&self.colors, size)
    }

    /// [`export_bitmap`](Self::export_bitmap), encoded as PNG.
    pub fn export_png(&self, size: SwatchSize) -> Result<Vec<u8>, ExportError> {
        let image = self.export_bitmap(size)?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(png)
    }

    /// Writes the palette to `path` as PNG.
    ///
    /// The image is encoded completely before the file is created, so no file
    /// is written if the export fails.
    pub fn export_png_to_path(
        &self,
        path: impl AsRef<Path>,
        size: SwatchSize,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        let png = self.export_png(size)?;
        std::fs::write(path, &png)?;

        tracing::info!(
            path = %path.display(),
            swatches = self.colors.len(),
            bytes = png.len(),
            "Exported palette"
        );

        Ok(())
    }
}

fn read_palette<S>(storage: &S) -> Result<Vec<Color>, StorageError>
where
    S: KeyValueStore,
{
    let Some(json) = storage.get(PALETTE_KEY)? else {
        return Ok(vec![]);
    };

    match serde_json::from_str(&json) {
        Ok(colors) => Ok(colors),
        Err(error) => {
            tracing::warn!(%error, "Ignoring malformed saved palette");
            Ok(vec![])
        }
    }
}

/// Paints `colors` as solid swatches of `size`, side by side with no gaps.
///
/// The canvas starts out fully transparent. A swatch's pixels are its color
/// with its own alpha, and fully transparent colors leave the canvas as is.
pub fn paint_swatches(colors: &[Color], size: SwatchSize) -> Result<RgbaImage, ExportError> {
    if colors.is_empty() {
        return Err(ExportError::EmptyPalette);
    }

    if size.width == 0 || size.height == 0 {
        return Err(ExportError::InvalidSwatchSize {
            width: size.width,
            height: size.height,
        });
    }

    let too_large = || {
        ExportError::TooLarge {
            count: colors.len(),
            width: size.width,
            height: size.height,
        }
    };

    let width = u32::try_from(colors.len())
        .ok()
        .and_then(|count| count.checked_mul(size.width))
        .ok_or_else(too_large)?;

    let bytes = u64::from(width)
        .checked_mul(u64::from(size.height))
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(too_large)?;
    if bytes > MAX_EXPORT_BYTES {
        return Err(too_large());
    }

    let pixels = colors
        .iter()
        .map(|color| {
            let rgba: [u8; 4] = color.to_srgba().into();
            if rgba[3] == 0 { [0; 4] } else { rgba }
        })
        .collect::<Vec<_>>();

    let mut image = RgbaImage::new(width, size.height);
    image.enumerate_pixels_mut().for_each(|(x, _y, pixel)| {
        *pixel = pixels[(x / size.width) as usize].into();
    });

    Ok(image)
}
