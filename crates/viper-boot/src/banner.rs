//! Startup banner.

/// ANSI escape for blue text.
const BLUE: &str = "\x1b[34m";

/// ANSI reset.
const RESET: &str = "\x1b[0m";

const BANNER: &str = r"
__     ___                 ____              _
\ \   / (_)_ __   ___ _ __| __ )  ___   ___ | |_
 \ \ / /| | '_ \ / _ \ '__|  _ \ / _ \ / _ \| __|
  \ V / | | |_) |  __/ |  | |_) | (_) | (_) | |_
   \_/  |_| .__/ \___|_|  |____/ \___/ \___/ \__|
          |_|
";

/// Print the ASCII banner in blue to stdout.
pub fn print_banner() {
    println!("{BLUE}{BANNER}{RESET}");
}
