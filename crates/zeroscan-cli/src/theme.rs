//! Startup banner.

use colored::Colorize;

/// Print the startup banner.
pub(crate) fn print_banner() {
    let version = zeroscan_core::VERSION;
    println!(
        "{}",
        format!(
            r"
 _____ _____ ____   ___  ____
|__  /| ____|  _ \ / _ \/ ___|  ___ __ _ _ __
  / / |  _| | |_) | | | \___ \ / __/ _` | '_ \
 / /_ | |___|  _ <| |_| |___) | (_| (_| | | | |
/____||_____|_| \_\\___/|____/ \___\__,_|_| |_|
                                          v{version}
"
        )
        .cyan()
    );
    println!("{}", "CMS Vulnerability Scanning Framework".dimmed());
    println!("{}", "Type 'help' for the command list.".dimmed());
    println!();
}
