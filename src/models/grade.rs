use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GRADE_LABELS;

// ---------------------------------------------------------------------------
// Grade: the three tracked olive-oil quality categories
// ---------------------------------------------------------------------------

/// Olive-oil grade. Serializes as its display label, which is also the key
/// of the grade's series in the canonical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Grade {
    VirgenExtra,
    Virgen,
    Lampante,
}

impl Grade {
    /// All grades in canonical order.
    pub const ALL: [Grade; 3] = [Grade::VirgenExtra, Grade::Virgen, Grade::Lampante];

    pub fn label(self) -> &'static str {
        match self {
            Grade::VirgenExtra => GRADE_LABELS[0],
            Grade::Virgen => GRADE_LABELS[1],
            Grade::Lampante => GRADE_LABELS[2],
        }
    }

    /// Short identifier used on the command line and by the chart front-end.
    pub fn key(self) -> &'static str {
        match self {
            Grade::VirgenExtra => "virgen_extra",
            Grade::Virgen => "virgen",
            Grade::Lampante => "lampante",
        }
    }

    /// Look up a grade by its exact display label.
    pub fn from_label(label: &str) -> Option<Grade> {
        Grade::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Grade> for &'static str {
    fn from(grade: Grade) -> Self {
        grade.label()
    }
}

impl TryFrom<String> for Grade {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Grade::from_label(&value).ok_or_else(|| format!("unknown grade label: {}", value))
    }
}

/// Accepts either the display label or the short key (case-insensitive).
impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.key().eq_ignore_ascii_case(wanted) || g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown grade: {}", s))
    }
}
