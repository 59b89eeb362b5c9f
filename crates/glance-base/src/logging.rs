use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide logger writing one line per record to stdout.
///
/// Lines carry a millisecond UTC timestamp so per-frame timings can be
/// read straight off the log.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        println!(
            "{} {:<5} [{:?}] {}:{} {}",
            timestamp_utc(),
            record.level(),
            std::thread::current().id(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// UTC wall clock as `YYYY-MM-DDTHH:MM:SS.mmm`.
fn timestamp_utc() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();

    let (year, month, day) = days_to_ymd(secs / 86400);
    let clock = secs % 86400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        year,
        month,
        day,
        clock / 3600,
        (clock % 3600) / 60,
        clock % 60,
        now.subsec_millis()
    )
}

fn is_leap_year(year: u64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days since the Unix epoch to a (year, month, day) civil date.
fn days_to_ymd(days: u64) -> (u64, u32, u32) {
    let mut year: u64 = 1970;
    let mut remaining = days;
    loop {
        let year_len: u64 = if is_leap_year(year) { 366 } else { 365 };
        if remaining < year_len {
            break;
        }
        remaining -= year_len;
        year += 1;
    }

    let feb: u64 = if is_leap_year(year) { 29 } else { 28 };
    let month_lens: [u64; 12] = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1u32;
    for len in month_lens {
        if remaining < len {
            break;
        }
        remaining -= len;
        month += 1;
    }

    (year, month, remaining as u32 + 1)
}

/// Install [`StdoutLogger`] as the global logger.
///
/// Debug builds log down to Debug, release builds down to Info. Calling
/// this more than once leaves the first logger in place.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;

    let max_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}

/// Log an error, flush the logger, and terminate the process with
/// status 1. The `log` crate has no Fatal level; this is the closest
/// equivalent for conditions nothing can recover from.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
        log::Log::flush(log::logger());
        std::process::exit(1);
    }};
}
