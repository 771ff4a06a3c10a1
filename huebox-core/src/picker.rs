//! The command interface a UI drives.
//!
//! A [`Picker`] holds the slider state, the saved palette and the theme. A UI
//! sets slider values, renders [`Picker::readout`] and forwards user actions
//! to the `on_*` methods. Every command finishes its storage write before it
//! returns, so indices from the last rendered palette stay valid until the
//! next command.

use std::{
    path::Path,
    time::{
        Duration,
        Instant,
    },
};

use crate::{
    classify::ColorClassifier,
    color::Color,
    storage::{
        KeyValueStore,
        StorageError,
    },
    store::{
        ExportError,
        PaletteStore,
        SwatchSize,
    },
    theme::{
        Theme,
        load_theme,
        save_theme,
    },
};

/// How long a "Copied ..." notice replaces the readout.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CopyTarget {
    Rgba,
    Hex,
}

impl CopyTarget {
    pub fn notice(self) -> &'static str {
        match self {
            Self::Rgba => "Copied RGB!",
            Self::Hex => "Copied Hex!",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Clipboard error: {message}")]
pub struct ClipboardError {
    pub message: String,
}

impl ClipboardError {
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Write-only text clipboard.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { target: CopyTarget, text: String },
    Failed { target: CopyTarget, message: String },
}

/// What the UI shows for the current color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    /// `rgba(r, g, b, a)`, or the copy notice.
    pub rgba: String,
    /// `#rrggbb`, or the copy notice.
    pub hex: String,
    /// Alpha with two decimals, e.g. `0.75`.
    pub alpha_text: String,
    pub name: &'static str,
}

#[derive(Clone, Copy, Debug)]
struct Notice {
    target: CopyTarget,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Picker<S> {
    color: Color,
    palette: PaletteStore<S>,
    theme: Theme,
    classifier: ColorClassifier<'static>,
    notice: Option<Notice>,
    notice_duration: Duration,
}

impl<S> Picker<S>
where
    S: KeyValueStore,
{
    /// Loads the palette and theme from `storage`. The sliders start at
    /// opaque black.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let theme = load_theme(&storage)?;
        let palette = PaletteStore::load(storage)?;

        tracing::debug!(%theme, swatches = palette.len(), "Opened picker");

        Ok(Self {
            color: Color::default(),
            palette,
            theme,
            classifier: ColorClassifier::standard(),
            notice: None,
            notice_duration: DEFAULT_NOTICE_DURATION,
        })
    }

    #[must_use]
    pub fn with_notice_duration(mut self, notice_duration: Duration) -> Self {
        self.notice_duration = notice_duration;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_red(&mut self, red: u8) {
        self.color.red = red;
    }

    pub fn set_green(&mut self, green: u8) {
        self.color.green = green;
    }

    pub fn set_blue(&mut self, blue: u8) {
        self.color.blue = blue;
    }

    /// `0..=100`, clamped.
    pub fn set_alpha_percent(&mut self, alpha_percent: u8) {
        self.color = self.color.with_alpha_percent(alpha_percent);
    }

    pub fn palette(&self) -> &PaletteStore<S> {
        &self.palette
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn name(&self) -> &'static str {
        self.classifier.closest_name(self.color.rgb())
    }

    /// The copy notice showing at `now`, if any.
    pub fn active_notice(&self, now: Instant) -> Option<CopyTarget> {
        self.notice
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.target)
    }

    pub fn readout(&self, now: Instant) -> Readout {
        let notice = self.active_notice(now);
        let text_or_notice = |target: CopyTarget, text: String| {
            if notice == Some(target) {
                target.notice().to_owned()
            }
            else {
                text
            }
        };

        Readout {
            rgba: text_or_notice(CopyTarget::Rgba, self.color.to_string()),
            hex: text_or_notice(CopyTarget::Hex, self.color.to_hex()),
            alpha_text: self.color.alpha_text(),
            name: self.name(),
        }
    }

    /// Saves the current color to the palette.
    pub fn on_save(&mut self) -> Result<Color, StorageError> {
        self.palette.add(self.color)?;
        Ok(self.color)
    }

    pub fn on_delete(&mut self, index: usize) -> Result<Option<Color>, StorageError> {
        self.palette.remove_at(index)
    }

    pub fn on_clear(&mut self) -> Result<(), StorageError> {
        self.palette.clear()
    }

    /// Moves the sliders to a saved color. Returns `None` and leaves the
    /// sliders alone if `index` is out of range.
    pub fn on_select(&mut self, index: usize) -> Option<Color> {
        let Some(color) = self.palette.get(index) else {
            tracing::warn!(index, len = self.palette.len(), "Swatch index out of range");
            return None;
        };

        self.color = color;
        Some(color)
    }

    pub fn on_export(&self, path: impl AsRef<Path>, size: SwatchSize) -> Result<(), ExportError> {
        self.palette.export_png_to_path(path, size)
    }

    pub fn on_toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let theme = self.theme.toggled();
        save_theme(self.palette.storage_mut(), theme)?;
        self.theme = theme;
        Ok(theme)
    }

    /// Copies the current rgba or hex text.
    ///
    /// Clipboard failures are reported in the outcome, not as an error. Either
    /// way the readout shows the copy notice until the notice duration has
    /// passed.
    pub fn copy_to_clipboard(
        &mut self,
        target: CopyTarget,
        clipboard: &mut impl Clipboard,
        now: Instant,
    ) -> CopyOutcome {
        let text = match target {
            CopyTarget::Rgba => self.color.to_string(),
            CopyTarget::Hex => self.color.to_hex(),
        };

        self.notice = Some(Notice {
            target,
            expires_at: now + self.notice_duration,
        });

        match clipboard.set_text(&text) {
            Ok(()) => CopyOutcome::Copied { target, text },
            Err(error) => {
                tracing::warn!(%error, copy_target = %target, "Copy to clipboard failed");
                CopyOutcome::Failed {
                    target,
                    message: error.message,
                }
            }
        }
    }
}
