//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::kernel::print::DEFAULT_SEPARATOR;
use crate::kernel::{ListOptions, PrintOptions};
use crate::settings::Settings;

/// zdialog - terminal dialogs for shell scripts
#[derive(Debug, Parser)]
#[command(name = "zdialog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file [default: $XDG_CONFIG_HOME/zdialog/settings.json]
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Display a list dialog and print the chosen rows
    #[command(allow_negative_numbers = true)]
    List(ListArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Add a column; TYPE is TEXT, NUM, CHK, IMG or TIP
    #[arg(long = "column", value_name = "NAME[:TYPE]")]
    pub columns: Vec<String>,

    /// Turn the first column into checkboxes and print the checked rows
    #[arg(long)]
    pub checklist: bool,

    /// Allow selecting several rows
    #[arg(long)]
    pub multiple: bool,

    /// Allow editing cells, adding and deleting rows
    #[arg(long)]
    pub editable: bool,

    /// Hide the column headers
    #[arg(long)]
    pub no_headers: bool,

    /// Print every row, not only the selected or checked ones
    #[arg(long)]
    pub print_all: bool,

    /// Print only this column (1-based, 0 prints all)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub print_column: usize,

    /// Output field separator [default: |]
    #[arg(long, value_name = "STR")]
    pub separator: Option<String>,

    /// Dialog title
    #[arg(long)]
    pub title: Option<String>,

    /// Text shown above the list
    #[arg(long)]
    pub text: Option<String>,

    /// Close the dialog after SECS seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Row data, one field per column; read from stdin when omitted
    #[arg(value_name = "DATA")]
    pub data: Vec<String>,
}

impl ListArgs {
    pub fn list_options(&self, settings: &Settings) -> ListOptions {
        ListOptions {
            editable: self.editable,
            multiple: self.multiple,
            checkbox: self.checklist,
            headers: !self.no_headers,
            always_selected: settings.always_selected,
            rules_hint: settings.rules_hint,
            title: self.title.clone(),
            text: self.text.clone(),
        }
    }

    pub fn print_options(&self, settings: &Settings) -> PrintOptions {
        let separator = self
            .separator
            .clone()
            .or_else(|| settings.separator.clone())
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
        PrintOptions {
            separator,
            print_column: self.print_column,
            print_all: self.print_all,
            checkbox: self.checklist,
        }
    }

    /// A zero timeout disables it.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Data tokens given on the command line select fixed-argument mode.
    pub fn has_fixed_data(&self) -> bool {
        !self.data.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli.rs"]
mod tests;
