//! Suggested expense categories
//!
//! Expenses carry a free-form category label. The labels below are the set
//! offered by default; any other string is accepted as-is.

use std::fmt;

/// Built-in category suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultCategory {
    Food,
    Transport,
    Entertainment,
    Health,
    Education,
    Services,
    Shopping,
    Other,
}

impl DefaultCategory {
    /// All default categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Health,
            Self::Education,
            Self::Services,
            Self::Shopping,
            Self::Other,
        ]
    }

    /// Label stored on expenses
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Services => "Services",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Chart color (hex RGB) used for this category's segment
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FF6B6B",
            Self::Transport => "#4ECDC4",
            Self::Entertainment => "#FFBE0B",
            Self::Health => "#95E1D3",
            Self::Education => "#9B59B6",
            Self::Services => "#3498DB",
            Self::Shopping => "#E74C3C",
            Self::Other => "#95A5A6",
        }
    }

    /// Chart color for any label; custom labels share the `Other` color
    pub fn color_for(label: &str) -> &'static str {
        Self::from_name(label).unwrap_or(Self::Other).color()
    }

    /// Look up a default category by label, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
    }

    /// Labels of every default category
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|c| c.display_name()).collect()
    }
}

impl fmt::Display for DefaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Normalize a user-supplied label: default labels get their canonical
/// spelling, anything else is kept trimmed.
pub fn normalize_category(label: &str) -> String {
    match DefaultCategory::from_name(label) {
        Some(default) => default.display_name().to_string(),
        None => label.trim().to_string(),
    }
}
