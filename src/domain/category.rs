//! Domain types representing expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of classification tags attached to every expense.
///
/// Identity is the variant; [`Category::label`] is presentation only, so a
/// label change never alters which rows belong to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Sightseeing,
    Mortgage,
    Car,
    Water,
    Electricity,
    CarInsurance,
    MotorcycleInsurance,
    Pet,
    Gifts,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Sightseeing,
        Category::Mortgage,
        Category::Car,
        Category::Water,
        Category::Electricity,
        Category::CarInsurance,
        Category::MotorcycleInsurance,
        Category::Pet,
        Category::Gifts,
    ];

    pub const DEFAULT: Category = Category::Food;

    /// Canonical name, stable across label changes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Sightseeing => "Sightseeing",
            Category::Mortgage => "Mortgage",
            Category::Car => "Car",
            Category::Water => "Water",
            Category::Electricity => "Electricity",
            Category::CarInsurance => "Car Insurance",
            Category::MotorcycleInsurance => "Motorcycle Insurance",
            Category::Pet => "Pet",
            Category::Gifts => "Gifts",
        }
    }

    /// Label written to the sheet and shown in pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food 🍱",
            Category::Transport => "Transport 🚆",
            Category::Shopping => "Shopping 🛍️",
            Category::Sightseeing => "Sightseeing 🏯",
            Category::Mortgage => "Mortgage 🏠",
            Category::Car => "Car 🚗",
            Category::Water => "Water 💧",
            Category::Electricity => "Electricity ⚡",
            Category::CarInsurance => "Car Insurance 🛡️",
            Category::MotorcycleInsurance => "Motorcycle Insurance 🏍️",
            Category::Pet => "Pet stuff 🐾",
            Category::Gifts => "Gifts 🎁",
        }
    }

    /// Exact match against either the display label or the canonical name.
    pub fn from_exact(value: &str) -> Option<Category> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label() == value || category.as_str() == value)
    }

    /// Resolves a raw value, falling back to [`Category::DEFAULT`] when it is
    /// absent or matches nothing. Surrounding whitespace is trimmed before the
    /// exact match, so `" Food 🍱 "` still resolves to Food.
    pub fn resolve(value: Option<&str>) -> Category {
        value
            .map(str::trim)
            .and_then(Self::from_exact)
            .unwrap_or(Self::DEFAULT)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
