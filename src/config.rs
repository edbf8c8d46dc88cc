//! Startup configuration: which backdrop to draw, read once from the page URL.

/// Query-string parameter that selects the backdrop.
pub const MODE_PARAM: &str = "bg";

/// Quiet period after the last layout event before geometry is rebuilt.
pub const RESIZE_QUIET_MS: f64 = 150.0;

/// Visual mode, fixed for the lifetime of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Constellation,
    Dna,
}

impl Mode {
    /// Parse the `?bg=` value. Anything unrecognised (or absent) falls back
    /// to the constellation.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("dna") => Mode::Dna,
            _ => Mode::Constellation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Constellation => "constellation",
            Mode::Dna => "dna",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_is_opt_in() {
        assert_eq!(Mode::from_query(Some("dna")), Mode::Dna);
    }

    #[test]
    fn unknown_and_missing_values_fall_back_to_constellation() {
        assert_eq!(Mode::from_query(None), Mode::Constellation);
        assert_eq!(Mode::from_query(Some("")), Mode::Constellation);
        assert_eq!(Mode::from_query(Some("aurora")), Mode::Constellation);
        assert_eq!(Mode::from_query(Some("DNA")), Mode::Constellation);
    }
}
