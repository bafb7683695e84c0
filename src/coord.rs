use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A file/rank pair, not necessarily on the board.
///
/// Files and ranks run 1..=8 on a standard board; any other value simply
/// fails the `Board` lookup, so offset arithmetic never needs bounds checks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coord {
    pub file: i16,
    pub rank: i16,
}

impl Coord {
    #[inline]
    pub const fn new(file: i16, rank: i16) -> Self {
        Self { file, rank }
    }

    /// Parse an algebraic coordinate like `"e4"` (case-insensitive file).
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_ch = chars.next()?;
        let rank_ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let file = match file_ch.to_ascii_lowercase() {
            c @ 'a'..='h' => (c as i16) - ('a' as i16) + 1,
            _ => return None,
        };
        let rank = rank_ch.to_digit(10).filter(|&d| (1..=8).contains(&d))? as i16;
        Some(Self { file, rank })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (1..=8).contains(&self.file) && (1..=8).contains(&self.rank) {
            let file_ch = (b'a' + (self.file - 1) as u8) as char;
            write!(f, "{}{}", file_ch, self.rank)
        } else {
            write!(f, "({},{})", self.file, self.rank)
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Coord) {
        self.file += rhs.file;
        self.rank += rhs.rank;
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

#[inline]
pub fn signum_i16(v: i16) -> i16 {
    if v > 0 {
        1
    } else if v < 0 {
        -1
    } else {
        0
    }
}
