use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

/// Eras produced by the generation service, oldest first.
pub const DEFAULT_ERAS: [&str; 11] = [
    "1950s", "1960s", "1970s", "1980s", "1990s", "2000s", "2010s", "2020s", "2030s", "2040s",
    "2050s",
];

/// A validated era tag such as `"1980s"`: four ASCII digits followed by `s`.
///
/// Ordering and equality follow the embedded year.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EraTag {
    tag: String,
    year: u16,
}

impl EraTag {
    /// Parse and validate an era tag.
    pub fn parse(tag: &str) -> ReelResult<Self> {
        let bytes = tag.as_bytes();
        let well_formed =
            bytes.len() == 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b's';
        if !well_formed {
            return Err(ReelError::validation(format!(
                "era tag '{tag}' must look like '1980s'"
            )));
        }
        let year = tag[..4]
            .parse::<u16>()
            .map_err(|e| ReelError::validation(format!("era tag '{tag}': {e}")))?;
        Ok(Self {
            tag: tag.to_string(),
            year,
        })
    }

    /// The year embedded in the tag (`1980` for `"1980s"`).
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The original tag text.
    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

impl PartialOrd for EraTag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EraTag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.year.cmp(&other.year)
    }
}

impl fmt::Display for EraTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/era.rs"]
mod tests;
