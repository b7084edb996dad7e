//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::pages::PageKind;

/// Terminal admin console for the PowerAlert outage notification platform.
#[derive(Debug, Parser)]
#[command(
    name = "poweralert-tui",
    about = "Browse outages, users, providers, service areas and resources from exported data"
)]
pub struct Cli {
    /// Directory holding the exported JSON envelopes.
    #[arg(long, value_name = "DIR", default_value = "sample")]
    pub data_dir: PathBuf,

    /// Page to open at startup.
    #[arg(long, value_enum, default_value = "outages")]
    pub page: PageKind,

    /// Rows per page.
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,

    /// Where debug logs are written.
    #[arg(long, value_name = "PATH", default_value = "poweralert-tui.log")]
    pub log_file: PathBuf,
}
