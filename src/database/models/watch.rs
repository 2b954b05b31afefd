use std::fmt;

/// A 1..=5 star rating. Only constructible through [`Rating::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            u8::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which shows a listing should return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatchFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

impl WatchFilter {
    /// Parse the `watched` query parameter. Absent means no filtering.
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        let Some(value) = value else {
            return Some(Self::All);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(Self::Watched),
            "false" | "0" | "no" | "off" => Some(Self::Unwatched),
            _ => None,
        }
    }

    pub(crate) fn where_clause(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Watched => "WHERE w.id IS NOT NULL",
            Self::Unwatched => "WHERE w.id IS NULL",
        }
    }
}
