//! Sudoku digit representation.

use std::fmt::{self, Display};

/// A sudoku digit in the range 1-9.
///
/// This enum provides type-safe representation of sudoku digits, making
/// out-of-range cell values unrepresentable. Each variant corresponds to
/// exactly one digit value.
///
/// # Examples
///
/// ```
/// use gridpace_core::Digit;
///
/// let digit = Digit::D5;
/// assert_eq!(digit.value(), 5);
///
/// // Create from a u8 value
/// let digit = Digit::from_value(7);
/// assert_eq!(digit, Digit::D7);
///
/// // Iterate over all digits in ascending order
/// for digit in Digit::ALL {
///     println!("{}", digit);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Digit {
    /// The digit 1.
    D1 = 1,
    /// The digit 2.
    D2 = 2,
    /// The digit 3.
    D3 = 3,
    /// The digit 4.
    D4 = 4,
    /// The digit 5.
    D5 = 5,
    /// The digit 6.
    D6 = 6,
    /// The digit 7.
    D7 = 7,
    /// The digit 8.
    D8 = 8,
    /// The digit 9.
    D9 = 9,
}

impl Digit {
    /// Array containing all digits from 1 to 9 in ascending order.
    ///
    /// This order is load-bearing for the solver: candidates are tried in
    /// `ALL` order, which fixes which solution a multi-solution puzzle
    /// resolves to.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpace_core::Digit;
    ///
    /// assert_eq!(Digit::ALL.len(), 9);
    /// assert_eq!(Digit::ALL[0], Digit::D1);
    /// assert_eq!(Digit::ALL[8], Digit::D9);
    /// ```
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
    ];

    /// Creates a digit from a u8 value in the range 1-9.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range 1-9.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpace_core::Digit;
    ///
    /// assert_eq!(Digit::from_value(5), Digit::D5);
    /// ```
    ///
    /// ```should_panic
    /// use gridpace_core::Digit;
    ///
    /// // This will panic
    /// let _ = Digit::from_value(0);
    /// ```
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            1 => Self::D1,
            2 => Self::D2,
            3 => Self::D3,
            4 => Self::D4,
            5 => Self::D5,
            6 => Self::D6,
            7 => Self::D7,
            8 => Self::D8,
            9 => Self::D9,
            _ => panic!("Invalid digit value: {value}"),
        }
    }

    /// Returns the numeric value of this digit (1-9).
    #[must_use]
    pub const fn value(&self) -> u8 {
        *self as u8
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}

/// Error returned when a character is not a valid digit 1-9.
///
/// `'0'` is deliberately rejected: a cell either holds a digit 1-9 or is
/// empty, and emptiness is expressed as `None`, never as a zero digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid digit character {_0:?}")]
pub struct DigitCharError(#[error(not(source))] pub char);

impl TryFrom<char> for Digit {
    type Error = DigitCharError;

    /// Converts a character `'1'`-`'9'` into a digit.
    ///
    /// This is the input boundary for free-text cell editing: anything
    /// other than `'1'`-`'9'` (including `'0'`) is rejected, so invalid
    /// input never reaches the solver.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpace_core::Digit;
    ///
    /// assert_eq!(Digit::try_from('7'), Ok(Digit::D7));
    /// assert!(Digit::try_from('0').is_err());
    /// assert!(Digit::try_from('x').is_err());
    /// ```
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let value = c.to_digit(10).and_then(|value| u8::try_from(value).ok());
        match value {
            Some(value) if value >= 1 => Ok(Self::from_value(value)),
            _ => Err(DigitCharError(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(Digit::from_value(1), Digit::D1);
        assert_eq!(Digit::from_value(9), Digit::D9);
        assert_eq!(Digit::D1.value(), 1);
        assert_eq!(Digit::D9.value(), 9);

        assert_eq!(Digit::ALL.len(), 9);
        for (i, digit) in Digit::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(digit.value()), i + 1);
            assert_eq!(Digit::from_value(digit.value()), digit);
        }

        assert_eq!(format!("{}", Digit::D1), "1");
        assert_eq!(format!("{}", Digit::D9), "9");

        let value: u8 = Digit::D5.into();
        assert_eq!(value, 5);
    }

    #[test]
    #[should_panic(expected = "Invalid digit value: 0")]
    fn test_from_value_zero_panics() {
        let _ = Digit::from_value(0);
    }

    #[test]
    #[should_panic(expected = "Invalid digit value: 10")]
    fn test_from_value_ten_panics() {
        let _ = Digit::from_value(10);
    }

    #[test]
    fn test_try_from_char() {
        for digit in Digit::ALL {
            let c = char::from(b'0' + digit.value());
            assert_eq!(Digit::try_from(c), Ok(digit));
        }

        for c in ['0', 'a', ' ', '.', '\n', '①'] {
            assert_eq!(Digit::try_from(c), Err(DigitCharError(c)));
        }
    }

    #[test]
    fn test_digit_char_error_message() {
        let err = Digit::try_from('0').unwrap_err();
        assert_eq!(err.to_string(), "invalid digit character '0'");
    }
}
