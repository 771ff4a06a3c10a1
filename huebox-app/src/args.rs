use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use huebox_core::Color;

/// Pick colors, name them and keep a palette
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Directory holding the saved palette and theme
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use the default config instead of reading the config file
    #[clap(long, global = true)]
    pub ignore_config: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(flatten)]
    Picker(PickerCommand),

    /// Print the default config
    DumpDefaultConfig {
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, default_value = "toml")]
        format: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum PickerCommand {
    /// Show rgba, hex and name of a color
    Show(ColorArgs),

    /// Show a color given as text, e.g. `rgba(1, 2, 3, 0.5)` or `#ff8000`
    Parse { text: String },

    /// Print the name of the closest reference color
    Name(ColorArgs),

    /// Save a color to the palette
    Save(ColorArgs),

    /// List the saved palette
    List,

    /// Remove a saved color
    Delete { index: usize },

    /// Show a saved color
    Pick { index: usize },

    /// Remove all saved colors
    Clear,

    /// Export the palette as PNG
    Export {
        #[clap(short, long)]
        output: Option<PathBuf>,

        #[clap(long)]
        swatch_width: Option<u32>,

        #[clap(long)]
        swatch_height: Option<u32>,
    },

    /// Copy a color's rgba text to the clipboard
    ///
    /// On Linux this waits until another program takes over the clipboard,
    /// unless `clipboard.hold_until_replaced` is off.
    #[clap(name = "copy")]
    CopyColor {
        #[clap(flatten)]
        color: ColorArgs,

        /// Copy the hex text instead
        #[clap(long)]
        hex: bool,
    },

    /// Show or toggle the theme
    Theme {
        #[clap(long)]
        toggle: bool,
    },
}

#[derive(Clone, Copy, Debug, clap::Args)]
pub struct ColorArgs {
    pub red: u8,
    pub green: u8,
    pub blue: u8,

    /// Alpha in percent
    #[clap(
        short,
        long,
        default_value_t = 100,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub alpha: u8,
}

impl ColorArgs {
    pub fn color(&self) -> Color {
        Color::from_percent(self.red, self.green, self.blue, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::args::{
        Args,
        Command,
        PickerCommand,
    };

    #[test]
    fn it_parses_color_arguments() {
        let args = Args::try_parse_from(["huebox", "save", "255", "0", "10", "-a", "40"]).unwrap();
        let Command::Picker(PickerCommand::Save(color)) = args.command else {
            panic!("expected save command");
        };
        assert_eq!(color.color().to_string(), "rgba(255, 0, 10, 0.40)");
    }

    #[test]
    fn it_rejects_alpha_above_100() {
        assert!(Args::try_parse_from(["huebox", "show", "1", "2", "3", "--alpha", "101"]).is_err());
        assert!(Args::try_parse_from(["huebox", "show", "1", "2", "256"]).is_err());
    }

    #[test]
    fn it_accepts_global_flags_after_the_command() {
        let args = Args::try_parse_from(["huebox", "list", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(args.data_dir.as_deref(), Some(std::path::Path::new("/tmp/x")));
    }
}
