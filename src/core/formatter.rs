//! Header rendering
//!
//! Produces the exact byte layout of a log line:
//!
//! ```text
//! [prefix]YYYY-MM-DD HH:MM:SS.micros file.rs:42: [prefix]body\n
//! ```
//!
//! Which parts appear is controlled by [`Flags`]. Numbers are assembled digit
//! by digit so output never depends on locale.

use super::flags::Flags;
use super::log_level::LogLevel;
use chrono::{DateTime, Datelike, Local, Timelike, Utc};

/// Prefix and flags of one severity level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFormat {
    prefix: String,
    flags: Flags,
}

impl LevelFormat {
    pub fn new(prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            prefix: prefix.into(),
            flags,
        }
    }

    /// Stock format for `level`.
    ///
    /// `OUT` lines are bare. The other levels carry date, time and the short
    /// file name, with the level tag just before the body:
    ///
    /// ```text
    /// 2024-03-09 14:02:11 main.rs:17: INFO listening on 0.0.0.0:8080
    /// ```
    pub fn default_for(level: LogLevel, use_colors: bool) -> Self {
        match level {
            LogLevel::Out => Self::new("", Flags::empty()),
            _ => Self::new(
                level_tag(level, use_colors),
                Flags::STD | Flags::MSG_PREFIX | Flags::SHORT_FILE,
            ),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Render a full line into `buf`, replacing its previous contents
    pub fn render_into(
        &self,
        buf: &mut Vec<u8>,
        timestamp: &DateTime<Utc>,
        file: &str,
        line: u32,
        body: &str,
    ) {
        buf.clear();
        self.format_header(buf, timestamp, file, line);
        buf.extend_from_slice(body.as_bytes());
        if !body.ends_with('\n') {
            buf.push(b'\n');
        }
    }

    pub fn render(&self, timestamp: &DateTime<Utc>, file: &str, line: u32, body: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.prefix.len() + body.len() + 48);
        self.render_into(&mut buf, timestamp, file, line, body);
        buf
    }

    fn format_header(&self, buf: &mut Vec<u8>, timestamp: &DateTime<Utc>, file: &str, line: u32) {
        let flags = self.flags;
        if !flags.contains(Flags::MSG_PREFIX) {
            buf.extend_from_slice(self.prefix.as_bytes());
        }

        if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
            if flags.contains(Flags::UTC) {
                write_clock(buf, flags, timestamp);
            } else {
                write_clock(buf, flags, &timestamp.with_timezone(&Local));
            }
        }

        if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            let file = if flags.contains(Flags::SHORT_FILE) {
                short_file(file)
            } else {
                file
            };
            buf.extend_from_slice(file.as_bytes());
            buf.push(b':');
            itoa(buf, u64::from(line), 0);
            buf.extend_from_slice(b": ");
        }

        if flags.contains(Flags::MSG_PREFIX) {
            buf.extend_from_slice(self.prefix.as_bytes());
        }
    }
}

/// Render one line with explicit flags and prefix
pub fn render(
    flags: Flags,
    prefix: &str,
    timestamp: &DateTime<Utc>,
    file: &str,
    line: u32,
    body: &str,
) -> Vec<u8> {
    LevelFormat::new(prefix, flags).render(timestamp, file, line, body)
}

/// Level tag with a trailing space, ANSI colored when `use_colors` is set
pub fn level_tag(level: LogLevel, use_colors: bool) -> String {
    match level.color_code() {
        Some(color) if use_colors => {
            format!("\u{1b}[{}m{}\u{1b}[0m ", color.to_fg_str(), level.to_str())
        }
        _ => format!("{} ", level.to_str()),
    }
}

fn write_clock<T: Datelike + Timelike>(buf: &mut Vec<u8>, flags: Flags, t: &T) {
    if flags.contains(Flags::DATE) {
        itoa(buf, i64::from(t.year()).unsigned_abs(), 4);
        buf.push(b'-');
        itoa(buf, u64::from(t.month()), 2);
        buf.push(b'-');
        itoa(buf, u64::from(t.day()), 2);
        buf.push(b' ');
    }
    if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
        itoa(buf, u64::from(t.hour()), 2);
        buf.push(b':');
        itoa(buf, u64::from(t.minute()), 2);
        buf.push(b':');
        itoa(buf, u64::from(t.second()), 2);
        if flags.contains(Flags::MICROSECONDS) {
            buf.push(b'.');
            // leap seconds show up as nanosecond >= 1e9
            itoa(buf, u64::from(t.nanosecond() % 1_000_000_000 / 1_000), 6);
        }
        buf.push(b' ');
    }
}

/// Everything after the last path separator. A separator in first position
/// is kept.
fn short_file(file: &str) -> &str {
    match file.rfind(['/', '\\']) {
        Some(i) if i > 0 => &file[i + 1..],
        _ => file,
    }
}

/// Append `value` in decimal, zero padded to at least `width` digits
fn itoa(buf: &mut Vec<u8>, mut value: u64, width: usize) {
    let mut digits = [0u8; 20];
    let mut pos = digits.len();
    loop {
        pos -= 1;
        digits[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 && digits.len() - pos >= width {
            break;
        }
    }
    buf.extend_from_slice(&digits[pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 09:05:03.000042 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 9, 5, 3)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(42)
    }

    fn utf8(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("formatter output is utf-8")
    }

    #[test]
    fn test_itoa_padding() {
        let mut buf = Vec::new();
        itoa(&mut buf, 7, 2);
        buf.push(b'|');
        itoa(&mut buf, 1234, 2);
        buf.push(b'|');
        itoa(&mut buf, 0, 0);
        buf.push(b'|');
        itoa(&mut buf, 42, 6);
        assert_eq!(buf, b"07|1234|0|000042");
    }

    #[test]
    fn test_bare_line() {
        let out = render(Flags::empty(), "", &fixed_datetime(), "", 0, "hello");
        assert_eq!(utf8(out), "hello\n");
    }

    #[test]
    fn test_full_header_utc() {
        let flags = Flags::STD | Flags::MICROSECONDS | Flags::UTC | Flags::LONG_FILE;
        let out = render(flags, "[app] ", &fixed_datetime(), "/src/app/main.rs", 17, "started");
        assert_eq!(
            utf8(out),
            "[app] 2025-01-08 09:05:03.000042 /src/app/main.rs:17: started\n"
        );
    }

    #[test]
    fn test_msg_prefix_moves_after_header() {
        let flags = Flags::STD | Flags::UTC | Flags::SHORT_FILE | Flags::MSG_PREFIX;
        let out = render(flags, "WARN ", &fixed_datetime(), "src/net/conn.rs", 9, "slow peer");
        assert_eq!(utf8(out), "2025-01-08 09:05:03 conn.rs:9: WARN slow peer\n");
    }

    #[test]
    fn test_short_file_overrides_long_file() {
        let flags = Flags::SHORT_FILE | Flags::LONG_FILE;
        let out = render(flags, "", &fixed_datetime(), "a/b/c.rs", 3, "x");
        assert_eq!(utf8(out), "c.rs:3: x\n");
    }

    #[test]
    fn test_short_file_keeps_leading_separator() {
        assert_eq!(short_file("/main.rs"), "/main.rs");
        assert_eq!(short_file("main.rs"), "main.rs");
        assert_eq!(short_file("src\\bin\\tool.rs"), "tool.rs");
    }

    #[test]
    fn test_microseconds_imply_time() {
        let flags = Flags::MICROSECONDS | Flags::UTC;
        let out = render(flags, "", &fixed_datetime(), "", 0, "tick");
        assert_eq!(utf8(out), "09:05:03.000042 tick\n");
    }

    #[test]
    fn test_date_only() {
        let out = render(Flags::DATE | Flags::UTC, "", &fixed_datetime(), "", 0, "d");
        assert_eq!(utf8(out), "2025-01-08 d\n");
    }

    #[test]
    fn test_local_time_conversion() {
        let ts = fixed_datetime();
        let local = ts.with_timezone(&Local);
        let out = render(Flags::STD, "", &ts, "", 0, "x");
        assert_eq!(utf8(out), format!("{} x\n", local.format("%Y-%m-%d %H:%M:%S")));
    }

    #[test]
    fn test_newline_rules() {
        let ts = fixed_datetime();
        assert_eq!(utf8(render(Flags::empty(), "", &ts, "", 0, "")), "\n");
        assert_eq!(utf8(render(Flags::empty(), "", &ts, "", 0, "a\n")), "a\n");
        assert_eq!(utf8(render(Flags::empty(), "", &ts, "", 0, "a\n\n")), "a\n\n");
        assert_eq!(utf8(render(Flags::empty(), "", &ts, "", 0, "a\nb")), "a\nb\n");
    }

    #[test]
    fn test_unresolved_location() {
        let out = render(Flags::SHORT_FILE, "", &fixed_datetime(), "???", 0, "lost");
        assert_eq!(utf8(out), "???:0: lost\n");
    }

    #[test]
    fn test_render_into_reuses_buffer() {
        let format = LevelFormat::new("> ", Flags::empty());
        let mut buf = b"stale bytes".to_vec();
        format.render_into(&mut buf, &fixed_datetime(), "", 0, "fresh");
        assert_eq!(buf, b"> fresh\n");
    }

    #[test]
    fn test_level_tags() {
        assert_eq!(level_tag(LogLevel::Info, false), "INFO ");
        assert_eq!(level_tag(LogLevel::Info, true), "\u{1b}[34mINFO\u{1b}[0m ");
        assert_eq!(level_tag(LogLevel::Warn, true), "\u{1b}[33mWARN\u{1b}[0m ");
        assert_eq!(level_tag(LogLevel::Error, true), "\u{1b}[31mERROR\u{1b}[0m ");
        assert_eq!(level_tag(LogLevel::Out, true), "OUT ");
    }

    #[test]
    fn test_default_formats() {
        let out = LevelFormat::default_for(LogLevel::Out, true);
        assert_eq!(out.prefix(), "");
        assert!(out.flags().is_empty());

        let warn = LevelFormat::default_for(LogLevel::Warn, false);
        assert_eq!(warn.prefix(), "WARN ");
        assert_eq!(
            warn.flags(),
            Flags::STD | Flags::MSG_PREFIX | Flags::SHORT_FILE
        );
    }
}
