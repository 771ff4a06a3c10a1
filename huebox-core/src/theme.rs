use crate::storage::{
    KeyValueStore,
    StorageError,
};

pub const THEME_KEY: &str = "theme";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Reads the stored theme. Missing or unknown values give the default.
pub fn load_theme<S>(storage: &S) -> Result<Theme, StorageError>
where
    S: KeyValueStore,
{
    let Some(value) = storage.get(THEME_KEY)? else {
        return Ok(Theme::default());
    };

    let theme = value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(%value, "Unknown theme, using default");
        Theme::default()
    });

    Ok(theme)
}

pub fn save_theme<S>(storage: &mut S, theme: Theme) -> Result<(), StorageError>
where
    S: KeyValueStore,
{
    storage.set(THEME_KEY, &theme.to_string())
}

#[cfg(test)]
mod tests {
    use crate::{
        storage::{
            KeyValueStore,
            MemoryStore,
        },
        theme::{
            THEME_KEY,
            Theme,
            load_theme,
            save_theme,
        },
    };

    #[test]
    fn it_defaults_to_dark() {
        assert_eq!(load_theme(&MemoryStore::new()).unwrap(), Theme::Dark);

        let storage = MemoryStore::from_iter([(THEME_KEY, "sepia")]);
        assert_eq!(load_theme(&storage).unwrap(), Theme::Dark);
    }

    #[test]
    fn it_stores_plain_names() {
        let mut storage = MemoryStore::new();
        save_theme(&mut storage, Theme::Light).unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(load_theme(&storage).unwrap(), Theme::Light);
    }

    #[test]
    fn it_toggles() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
