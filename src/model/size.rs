use std::fmt;

/// Relative effort on the Fibonacci-like estimate scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Zero,
    One,
    Two,
    Three,
    Five,
    Eight,
    Thirteen,
}

impl Size {
    pub const ALL: [Size; 7] = [
        Size::Zero,
        Size::One,
        Size::Two,
        Size::Three,
        Size::Five,
        Size::Eight,
        Size::Thirteen,
    ];

    pub const DEFAULT: Size = Size::Three;

    pub fn value(&self) -> u8 {
        match self {
            Size::Zero => 0,
            Size::One => 1,
            Size::Two => 2,
            Size::Three => 3,
            Size::Five => 5,
            Size::Eight => 8,
            Size::Thirteen => 13,
        }
    }

    pub fn from_value(value: u8) -> Option<Size> {
        Size::ALL.into_iter().find(|s| s.value() == value)
    }

    /// Story points come back as floats; anything off the scale is rejected.
    pub fn from_estimate(estimate: f64) -> Option<Size> {
        if estimate.fract() != 0.0 || !(0.0..=13.0).contains(&estimate) {
            return None;
        }
        Size::from_value(estimate as u8)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_values_round_trip_through_from_value() {
        let values: Vec<u8> = Size::ALL.iter().map(Size::value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 5, 8, 13]);
        for size in Size::ALL {
            assert_eq!(Size::from_value(size.value()), Some(size));
        }
    }

    #[test]
    fn off_scale_values_are_rejected() {
        for value in [4, 6, 7, 9, 10, 11, 12, 14, 21, 255] {
            assert_eq!(Size::from_value(value), None, "{value} accepted");
        }
    }

    #[test]
    fn estimates_must_be_whole_scale_points() {
        assert_eq!(Size::from_estimate(5.0), Some(Size::Five));
        assert_eq!(Size::from_estimate(0.0), Some(Size::Zero));
        assert_eq!(Size::from_estimate(2.5), None);
        assert_eq!(Size::from_estimate(-1.0), None);
        assert_eq!(Size::from_estimate(21.0), None);
    }
}
