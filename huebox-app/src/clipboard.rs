use huebox_core::picker::{
    Clipboard,
    ClipboardError,
};

use crate::config::ClipboardConfig;

/// The OS clipboard.
///
/// Connects on first use, so a missing clipboard only shows up as a failed
/// copy.
///
/// On Linux, X11 and Wayland only serve the copied text while its owner is
/// alive. With `hold_until_replaced` set, [`set_text`](Clipboard::set_text)
/// blocks until another program takes over the clipboard, so the text
/// outlives this process.
#[derive(derive_more::Debug)]
pub struct SystemClipboard {
    #[debug("arboard::Clipboard {{ ... }}")]
    inner: Option<arboard::Clipboard>,
    hold_until_replaced: bool,
}

impl SystemClipboard {
    pub fn new(hold_until_replaced: bool) -> Self {
        Self {
            inner: None,
            hold_until_replaced,
        }
    }

    pub fn from_config(config: &ClipboardConfig) -> Self {
        Self::new(config.hold_until_replaced)
    }

    pub fn holds_until_replaced(&self) -> bool {
        self.hold_until_replaced
    }

    #[cfg(target_os = "linux")]
    fn write(
        &self,
        clipboard: &mut arboard::Clipboard,
        text: &str,
    ) -> Result<(), arboard::Error> {
        use arboard::SetExtLinux;

        let set = clipboard.set();
        if self.hold_until_replaced {
            tracing::info!("Waiting for another program to take over the clipboard");
            set.wait().text(text)
        }
        else {
            set.text(text)
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn write(
        &self,
        clipboard: &mut arboard::Clipboard,
        text: &str,
    ) -> Result<(), arboard::Error> {
        clipboard.set_text(text)
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(ClipboardError::new)?,
        };

        let result = self
            .write(&mut clipboard, text)
            .map_err(ClipboardError::new);
        self.inner = Some(clipboard);

        tracing::debug!(ok = result.is_ok(), len = text.len(), "Set clipboard text");
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        clipboard::SystemClipboard,
        config::ClipboardConfig,
    };

    #[test]
    fn it_holds_the_clipboard_by_default() {
        let clipboard = SystemClipboard::from_config(&ClipboardConfig::default());
        assert!(clipboard.holds_until_replaced());
    }

    #[test]
    fn it_can_release_the_clipboard_on_exit() {
        let config: ClipboardConfig = toml::from_str("hold_until_replaced = false").unwrap();
        let clipboard = SystemClipboard::from_config(&config);
        assert!(!clipboard.holds_until_replaced());
    }
}
