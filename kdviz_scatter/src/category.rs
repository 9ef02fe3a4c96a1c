// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed category table labels index into.

use core::fmt;

/// Image category. Labels are indices into [`Category::ALL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Label 0.
    Airplane,
    /// Label 1.
    Automobile,
    /// Label 2.
    Bird,
    /// Label 3.
    Cat,
    /// Label 4.
    Deer,
    /// Label 5.
    Dog,
    /// Label 6.
    Frog,
    /// Label 7.
    Horse,
    /// Label 8.
    Ship,
    /// Label 9.
    Truck,
}

impl Category {
    /// All categories in label order.
    pub const ALL: [Self; 10] = [
        Self::Airplane,
        Self::Automobile,
        Self::Bird,
        Self::Cat,
        Self::Deer,
        Self::Dog,
        Self::Frog,
        Self::Horse,
        Self::Ship,
        Self::Truck,
    ];

    /// Look up a label; `None` if it is outside the table.
    pub fn from_label(label: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(label).ok()?).copied()
    }

    /// The label index of this category.
    pub fn label(self) -> u32 {
        self as u32
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Airplane => "airplane",
            Self::Automobile => "automobile",
            Self::Bird => "bird",
            Self::Cat => "cat",
            Self::Deer => "deer",
            Self::Dog => "dog",
            Self::Frog => "frog",
            Self::Horse => "horse",
            Self::Ship => "ship",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a raw label, `"unknown"` when outside the table.
pub fn category_name(label: u32) -> &'static str {
    Category::from_label(label).map_or("unknown", Category::name)
}
