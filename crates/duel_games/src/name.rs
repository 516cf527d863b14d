//! Fixed-width 64-bit account names.
//!
//! Participants, storage scopes, contract accounts and verb tags all share
//! this identifier type. The text form packs up to 13 symbols of the
//! alphabet `.12345abcdefghijklmnopqrstuvwxyz` into a `u64`: the first 12
//! symbols take 5 bits each from the high end, the 13th takes the low 4 bits
//! and is therefore limited to `.12345abcdefghij`.

use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Longest text form of a name.
pub const MAX_NAME_LEN: usize = 13;

/// An account name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Name(u64);

/// Error parsing the text form of a [`Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum NameError {
    /// More than 13 symbols.
    #[display("Name is {len} symbols long, at most 13 allowed")]
    TooLong {
        /// Length of the rejected input.
        len: usize,
    },
    /// A symbol outside the alphabet, or outside `.1-5a-j` in 13th place.
    #[display("Invalid symbol {symbol:?} at index {index}")]
    InvalidSymbol {
        /// Offset of the offending byte.
        index: usize,
        /// The offending byte.
        symbol: char,
    },
}

const fn symbol_value(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

const fn encode(bytes: &[u8]) -> Result<u64, NameError> {
    if bytes.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong { len: bytes.len() });
    }

    let mut value = 0u64;
    let mut i = 0;
    while i < bytes.len() {
        let invalid = NameError::InvalidSymbol {
            index: i,
            symbol: bytes[i] as char,
        };
        let sym = match symbol_value(bytes[i]) {
            Some(sym) => sym,
            None => return Err(invalid),
        };
        if i < 12 {
            value |= sym << (64 - 5 * (i + 1));
        } else if sym > 0x0f {
            return Err(invalid);
        } else {
            value |= sym;
        }
        i += 1;
    }
    Ok(value)
}

impl Name {
    /// Wraps a raw 64-bit value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Parses a name known at compile time.
    ///
    /// Intended for `const` items, where an invalid literal fails the build.
    pub const fn from_static(s: &'static str) -> Self {
        match encode(s.as_bytes()) {
            Ok(raw) => Self(raw),
            Err(_) => panic!("invalid account name literal"),
        }
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encode(s.as_bytes()).map(Self)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[MAX_NAME_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let len = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        for &c in &out[..len] {
            write!(f, "{}", c as char)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name({})", self)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_u64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        } else {
            u64::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_text() {
        for text in ["alice", "bob", "tictactoe", "games", "a1b2c3d4e5", "zzzzzzzzzzzzj"] {
            let name: Name = text.parse().unwrap();
            assert_eq!(name.to_string(), text);
        }
    }

    #[test]
    fn test_known_encoding() {
        // "a" is symbol 6 in the top five bits.
        let name: Name = "a".parse().unwrap();
        assert_eq!(name.raw(), 6u64 << 59);
    }

    #[test]
    fn test_trailing_dots_are_trimmed() {
        let name: Name = "bob..".parse().unwrap();
        assert_eq!(name.to_string(), "bob");
        assert_eq!(name, "bob".parse().unwrap());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            "Alice".parse::<Name>(),
            Err(NameError::InvalidSymbol { index: 0, symbol: 'A' })
        );
        assert_eq!(
            "abcdefghijklmn".parse::<Name>(),
            Err(NameError::TooLong { len: 14 })
        );
        assert!("abcdefghijklz".parse::<Name>().is_err());
        assert!("bob6".parse::<Name>().is_err());
    }

    #[test]
    fn test_const_parse_matches_runtime() {
        const GAMES: Name = Name::from_static("games");
        assert_eq!(GAMES, "games".parse().unwrap());
    }

    #[test]
    fn test_serde_is_text_for_json() {
        let name: Name = "carol".parse().unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"carol\"");
        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_serde_is_raw_for_bincode() {
        let name: Name = "carol".parse().unwrap();
        let bytes = bincode::serialize(&name).unwrap();
        assert_eq!(bytes, name.raw().to_le_bytes());
    }
}
