use std::{
    io::Write,
    time::Instant,
};

use color_eyre::eyre::WrapErr;
use huebox_core::{
    Color,
    KeyValueStore,
    Picker,
    picker::{
        Clipboard,
        CopyOutcome,
        CopyTarget,
        Readout,
    },
};

use crate::{
    Error,
    args::PickerCommand,
    config::AppConfig,
    files::format_path,
};

/// Runs one command against the picker, writing what a user should see to
/// `out`.
pub fn run<S, C, W>(
    command: PickerCommand,
    picker: &mut Picker<S>,
    clipboard: &mut C,
    config: &AppConfig,
    out: &mut W,
) -> Result<(), Error>
where
    S: KeyValueStore,
    C: Clipboard,
    W: Write,
{
    match command {
        PickerCommand::Show(color) => {
            picker.set_color(color.color());
            write_readout(out, &picker.readout(Instant::now()))?;
        }
        PickerCommand::Parse { text } => {
            let color: Color = text.parse()?;
            picker.set_color(color);
            write_readout(out, &picker.readout(Instant::now()))?;
        }
        PickerCommand::Name(color) => {
            picker.set_color(color.color());
            writeln!(out, "{}", picker.name())?;
        }
        PickerCommand::Save(color) => {
            picker.set_color(color.color());
            let color = picker.on_save().wrap_err("Could not save color")?;
            writeln!(
                out,
                "Saved {color} as #{}",
                picker.palette().len().saturating_sub(1)
            )?;
        }
        PickerCommand::List => {
            if picker.palette().is_empty() {
                writeln!(out, "Palette is empty.")?;
            }
            for (index, color) in picker.palette().colors().iter().enumerate() {
                writeln!(
                    out,
                    "{index:>3}  {:<24} {}  {}",
                    color.to_string(),
                    color.to_hex(),
                    huebox_core::closest_name(color.red, color.green, color.blue)
                )?;
            }
        }
        PickerCommand::Delete { index } => {
            match picker.on_delete(index).wrap_err("Could not delete color")? {
                Some(color) => writeln!(out, "Deleted {color}")?,
                None => writeln!(out, "No saved color at #{index}")?,
            }
        }
        PickerCommand::Pick { index } => {
            if picker.on_select(index).is_some() {
                write_readout(out, &picker.readout(Instant::now()))?;
            }
            else {
                writeln!(out, "No saved color at #{index}")?;
            }
        }
        PickerCommand::Clear => {
            let count = picker.palette().len();
            picker.on_clear().wrap_err("Could not clear palette")?;
            writeln!(out, "Removed {count} colors")?;
        }
        PickerCommand::Export {
            output,
            swatch_width,
            swatch_height,
        } => {
            let path = output.unwrap_or_else(|| config.export.file_name.clone());
            let mut size = config.export.swatch_size();
            if let Some(width) = swatch_width {
                size.width = width;
            }
            if let Some(height) = swatch_height {
                size.height = height;
            }

            picker
                .on_export(&path, size)
                .wrap_err_with(|| format!("Could not export palette to {}", format_path(&path)))?;
            writeln!(out, "Exported palette to {}", format_path(&path))?;
        }
        PickerCommand::CopyColor { color, hex } => {
            picker.set_color(color.color());
            let target = if hex { CopyTarget::Hex } else { CopyTarget::Rgba };

            let now = Instant::now();
            if let CopyOutcome::Failed { message, .. } =
                picker.copy_to_clipboard(target, clipboard, now)
            {
                writeln!(out, "Could not copy to clipboard: {message}")?;
            }
            write_readout(out, &picker.readout(now))?;
        }
        PickerCommand::Theme { toggle } => {
            let theme = if toggle {
                picker.on_toggle_theme().wrap_err("Could not save theme")?
            }
            else {
                picker.theme()
            };
            writeln!(out, "{theme}")?;
        }
    }

    Ok(())
}

fn write_readout(out: &mut impl Write, readout: &Readout) -> Result<(), Error> {
    writeln!(out, "{}", readout.rgba)?;
    writeln!(out, "{}", readout.hex)?;
    writeln!(out, "Alpha: {}", readout.alpha_text)?;
    writeln!(out, "Name: {}", readout.name)?;
    Ok(())
}
