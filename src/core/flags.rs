//! Header flags selecting which fields a level's header carries

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitset of header fields.
///
/// # Example
///
/// ```
/// use log4u::Flags;
///
/// let flags = Flags::STD | Flags::MSG_PREFIX | Flags::SHORT_FILE;
/// assert!(flags.contains(Flags::DATE));
/// assert!(!flags.contains(Flags::UTC));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u16);

impl Flags {
    /// `2009-01-23`
    pub const DATE: Flags = Flags(1 << 0);
    /// `01:23:23`
    pub const TIME: Flags = Flags(1 << 1);
    /// `01:23:23.123123`, implies `TIME`
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full path and line: `/a/b/c/main.rs:23`
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final path element and line: `main.rs:23`. Overrides `LONG_FILE`
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Render date and time in UTC instead of local time
    pub const UTC: Flags = Flags(1 << 5);
    /// Move the prefix from the start of the line to just before the body
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    /// Date and time
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    pub const fn empty() -> Self {
        Flags(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u16) -> Self {
        Flags(bits & 0x7f)
    }

    /// All bits of `other` are set
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Any bit of `other` is set
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;

    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Flags, &str); 7] = [
            (Flags::DATE, "DATE"),
            (Flags::TIME, "TIME"),
            (Flags::MICROSECONDS, "MICROSECONDS"),
            (Flags::LONG_FILE, "LONG_FILE"),
            (Flags::SHORT_FILE, "SHORT_FILE"),
            (Flags::UTC, "UTC"),
            (Flags::MSG_PREFIX, "MSG_PREFIX"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Flags({})", set.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_is_date_and_time() {
        assert_eq!(Flags::STD, Flags::DATE | Flags::TIME);
        assert!(Flags::STD.intersects(Flags::TIME | Flags::UTC));
        assert!(!Flags::STD.contains(Flags::TIME | Flags::UTC));
    }

    #[test]
    fn test_truncate_drops_unknown_bits() {
        assert_eq!(Flags::from_bits_truncate(0xff80), Flags::empty());
        assert_eq!(Flags::from_bits_truncate(0x0041), Flags::DATE | Flags::MSG_PREFIX);
    }

    #[test]
    fn test_debug_lists_names() {
        let flags = Flags::DATE | Flags::SHORT_FILE;
        assert_eq!(format!("{:?}", flags), "Flags(DATE | SHORT_FILE)");
    }
}
