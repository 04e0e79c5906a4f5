mod pretty_list;

use std::{fmt::Write as FmtWrite, sync::OnceLock};

use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record};
use regex::Regex;
use textwrap::{termwidth, Options};

pub use self::pretty_list::PrettyList;

/// Matches the last wrapped line of a log entry so it can be closed with a
/// different delimiter.
static LAST_LINE_MATCHER: OnceLock<Regex> = OnceLock::new();

/// Setup console logging for this application.
///
/// The returned handle must be kept alive for as long as the application
/// wants log output.
pub fn setup() -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(multiline_format)
        .start()?;

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );

    Ok(handle)
}

/// An opinionated formatting function for flexi_logger which automatically
/// wraps content to the terminal width.
///
/// Each entry opens with `┏`, continues with `┃`, and closes with `┗` so it's
/// easy to tell where a big multiline log statement begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let size = termwidth().min(74);
    let wrap_options = Options::new(size)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");

    let mut full_line = String::new();
    writeln!(
        full_line,
        "{} [{}] [{}:{}]",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    )
    .map_err(std::io::Error::other)?;

    write!(&mut full_line, "{}", &record.args())
        .map_err(std::io::Error::other)?;

    writeln!(w, "{}", close_last_line(&textwrap::fill(&full_line, wrap_options)))
}

/// Replace the continuation delimiter on the final line of a wrapped entry.
fn close_last_line(wrapped: &str) -> String {
    let matcher = LAST_LINE_MATCHER
        .get_or_init(|| Regex::new(r"(┃ )(.*)$").expect("valid regex"));
    matcher.replace(wrapped, "┗ $2").into_owned()
}
