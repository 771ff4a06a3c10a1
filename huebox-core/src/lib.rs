#![warn(clippy::todo, unused_qualifications)]

//! Color picker core: naming colors, keeping a saved palette and exporting it
//! as an image.
//!
//! Nothing in here knows about a UI. A UI layer drives a [`Picker`] and
//! renders what it reports.

pub mod classify;
pub mod color;
pub mod picker;
pub mod storage;
pub mod store;
pub mod theme;

pub use crate::{
    classify::closest_name,
    color::Color,
    picker::Picker,
    storage::{
        FileStore,
        KeyValueStore,
        MemoryStore,
        StorageError,
    },
    store::{
        ExportError,
        PaletteStore,
        SwatchSize,
    },
    theme::Theme,
};
