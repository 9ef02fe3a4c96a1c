// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image id validation.

use core::fmt;
use core::num::IntErrorKind;

use kdviz_scatter::Dataset;

use crate::error::ValidationError;

/// Largest id of the reference server's 5000-image dataset.
pub const DEFAULT_MAX_ID: u32 = 4999;

/// A validated image id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

impl ImageId {
    /// The raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Accepted id range, `0..=max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IdBounds {
    max: u32,
}

impl Default for IdBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ID)
    }
}

impl IdBounds {
    /// Accept `0..=max`.
    pub const fn new(max: u32) -> Self {
        Self { max }
    }

    /// Bound taken from a loaded dataset's largest id.
    ///
    /// Returns `None` for an empty dataset.
    pub fn from_dataset(dataset: &Dataset) -> Option<Self> {
        dataset.max_id().map(Self::new)
    }

    /// Largest accepted id.
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Validate `raw` against these bounds.
    pub fn validate(self, raw: &str) -> Result<ImageId, ValidationError> {
        validate_id(raw, self.max)
    }
}

/// Parse `raw` as an integer id in `0..=max_id`.
///
/// Surrounding whitespace is ignored. Only plain integers are accepted
/// (`"12"`, `"+12"`, `"-3"`); `"1.0"` or `"1e3"` are not numbers. An integer
/// too large for any machine type is out of range rather than not a number.
pub fn validate_id(raw: &str, max_id: u32) -> Result<ImageId, ValidationError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty { max: max_id });
    }
    let out_of_range = || ValidationError::OutOfRange {
        input: input.to_owned(),
        max: max_id,
    };
    match input.parse::<i64>() {
        Ok(v) => match u32::try_from(v) {
            Ok(id) if id <= max_id => Ok(ImageId(id)),
            _ => Err(out_of_range()),
        },
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(out_of_range())
        }
        Err(_) => Err(ValidationError::NotANumber {
            input: input.to_owned(),
            max: max_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_at_max_id() {
        assert_eq!(validate_id("4999", DEFAULT_MAX_ID), Ok(ImageId(4999)));
        assert!(matches!(
            validate_id("5000", DEFAULT_MAX_ID),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(validate_id("0", DEFAULT_MAX_ID), Ok(ImageId(0)));
        assert!(matches!(
            validate_id("-1", DEFAULT_MAX_ID),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn empty_and_non_numeric() {
        assert_eq!(
            validate_id("   ", 10),
            Err(ValidationError::Empty { max: 10 })
        );
        for raw in ["abc", "1.0", "1e3", "12a", "0x10", "--1"] {
            assert!(
                matches!(validate_id(raw, 10_000), Err(ValidationError::NotANumber { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn whitespace_and_sign_are_tolerated() {
        assert_eq!(validate_id(" 42\n", 100), Ok(ImageId(42)));
        assert_eq!(validate_id("+7", 100), Ok(ImageId(7)));
    }

    #[test]
    fn huge_integers_are_out_of_range() {
        let err = validate_id("99999999999999999999999", DEFAULT_MAX_ID).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                input: "99999999999999999999999".into(),
                max: DEFAULT_MAX_ID
            }
        );
        assert!(matches!(
            validate_id("-99999999999999999999999", DEFAULT_MAX_ID),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn bounds_from_dataset() {
        let ds = Dataset::from_table("id,x,y,z,label\n3,0,0,0,0\n17,0,0,0,0\n").unwrap();
        let b = IdBounds::from_dataset(&ds).unwrap();
        assert_eq!(b.max(), 17);
        assert!(b.validate("17").is_ok());
        assert!(b.validate("18").is_err());
        assert_eq!(IdBounds::from_dataset(&Dataset::default()), None);
        assert_eq!(IdBounds::default().max(), DEFAULT_MAX_ID);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn accepts_exactly_the_range(i in any::<i64>(), max in 0_u32..100_000) {
                let ok = validate_id(&i.to_string(), max).is_ok();
                prop_assert_eq!(ok, (0..=i64::from(max)).contains(&i));
            }

            #[test]
            fn near_boundary(max in 0_u32..100_000, d in -3_i64..=3) {
                let i = i64::from(max) + d;
                let r = validate_id(&i.to_string(), max);
                if (0..=i64::from(max)).contains(&i) {
                    prop_assert_eq!(r, Ok(ImageId(u32::try_from(i).unwrap())));
                } else {
                    let is_out_of_range = matches!(r, Err(ValidationError::OutOfRange { .. }));
                    prop_assert!(is_out_of_range);
                }
            }
        }
    }
}
