use std::fmt;

/// Lower bound of the "High" band on `|r|`.
pub const HIGH_THRESHOLD: f64 = 0.7;
/// Lower bound of the "Medium" band on `|r|`.
pub const MEDIUM_THRESHOLD: f64 = 0.3;

pub const PEARSON_FORMULA: &str = "r = Σ[(xi - x̄)(yi - ȳ)] / √[Σ(xi - x̄)² Σ(yi - ȳ)²]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    High,
    Medium,
    Low,
}

impl Magnitude {
    pub fn of(value: f64) -> Self {
        let abs = value.abs();
        if abs >= HIGH_THRESHOLD {
            Magnitude::High
        } else if abs >= MEDIUM_THRESHOLD {
            Magnitude::Medium
        } else {
            Magnitude::Low
        }
    }

    pub fn relationship(self) -> &'static str {
        match self {
            Magnitude::High => "strong relationship",
            Magnitude::Medium => "moderate relationship",
            Magnitude::Low => "weak relationship",
        }
    }

    /// Badge colour as RGB.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Magnitude::High => [0xd3, 0x2f, 0x2f],
            Magnitude::Medium => [0xf5, 0x7c, 0x00],
            Magnitude::Low => [0x38, 0x8e, 0x3c],
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::High => write!(f, "High"),
            Magnitude::Medium => write!(f, "Medium"),
            Magnitude::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Zero counts as negative.
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => write!(f, "Positive"),
            Direction::Negative => write!(f, "Negative"),
        }
    }
}

/// One row of the static strength guide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthBand {
    pub magnitude: Magnitude,
    pub range: &'static str,
    pub description: &'static str,
}

pub const STRENGTH_GUIDE: [StrengthBand; 3] = [
    StrengthBand {
        magnitude: Magnitude::High,
        range: "0.7 - 1.0",
        description: "Strong correlation",
    },
    StrengthBand {
        magnitude: Magnitude::Medium,
        range: "0.3 - 0.7",
        description: "Moderate correlation",
    },
    StrengthBand {
        magnitude: Magnitude::Low,
        range: "0.0 - 0.3",
        description: "Weak correlation",
    },
];

// ---------------------------------------------------------------------------
// Detail explanation
// ---------------------------------------------------------------------------

/// Everything the detail view shows for one clicked cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationDetail {
    pub row: String,
    pub col: String,
    pub value: f64,
    pub magnitude: Magnitude,
    pub direction: Direction,
}

impl CorrelationDetail {
    pub fn classify(row: &str, col: &str, value: f64) -> Self {
        Self {
            row: row.to_string(),
            col: col.to_string(),
            value,
            magnitude: Magnitude::of(value),
            direction: Direction::of(value),
        }
    }

    /// e.g. "High Positive Correlation".
    pub fn headline(&self) -> String {
        format!("{} {} Correlation", self.magnitude, self.direction)
    }

    pub fn interpretation(&self) -> String {
        format!(
            "This correlation coefficient indicates a {} between {} and {}.",
            self.magnitude.relationship(),
            self.row,
            self.col
        )
    }

    pub fn trend(&self) -> &'static str {
        match self.direction {
            Direction::Positive => {
                "As one variable increases, the other tends to increase as well."
            }
            Direction::Negative => "As one variable increases, the other tends to decrease.",
        }
    }
}
