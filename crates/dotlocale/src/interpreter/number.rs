//! Number and byte-size formatting.

use bon::Builder;

/// Decimal separator used when neither the options nor the catalog set one.
pub(crate) const DEFAULT_SEPARATOR: &str = ".";

/// Enough fraction digits to print any `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Bytes per storage unit step.
const KILO: f64 = 1024.0;

/// Options for [`format_number`] and
/// [`Resolver::to_number`](crate::Resolver::to_number).
#[derive(Debug, Clone, Builder)]
pub struct NumberFormat {
    /// Digits after the decimal separator.
    #[builder(default = 3)]
    pub precision: usize,

    /// Thousands delimiter.
    #[builder(into, default = ",".to_string())]
    pub delimiter: String,

    /// Decimal separator. When unset, the resolver uses the locale's
    /// `number.format.separator` entry and [`format_number`] uses `"."`.
    #[builder(into)]
    pub separator: Option<String>,

    /// Drop trailing fractional zeros, and the separator if nothing remains.
    #[builder(default)]
    pub strip_insignificant_zeros: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::builder().build()
    }
}

/// Options for [`Resolver::to_human_size`](crate::Resolver::to_human_size).
#[derive(Debug, Clone, Builder)]
pub struct HumanSizeFormat {
    /// Overrides the automatic precision (0 for whole quotients, else 1).
    pub precision: Option<usize>,

    /// Thousands delimiter.
    #[builder(into, default = String::new())]
    pub delimiter: String,

    /// Decimal separator, as in [`NumberFormat::separator`].
    #[builder(into)]
    pub separator: Option<String>,

    /// As in [`NumberFormat::strip_insignificant_zeros`].
    #[builder(default)]
    pub strip_insignificant_zeros: bool,

    /// Output template: `%n` is the number, `%u` the unit label.
    #[builder(into, default = "%n%u".to_string())]
    pub format: String,
}

impl Default for HumanSizeFormat {
    fn default() -> Self {
        HumanSizeFormat::builder().build()
    }
}

/// A storage unit chosen for a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageUnit {
    Byte,
    Kb,
    Mb,
    Gb,
    Tb,
}

impl StorageUnit {
    const LADDER: [StorageUnit; 5] = [
        StorageUnit::Byte,
        StorageUnit::Kb,
        StorageUnit::Mb,
        StorageUnit::Gb,
        StorageUnit::Tb,
    ];

    /// Pick a unit for `bytes`, returning it with the scaled quantity.
    ///
    /// ```
    /// use dotlocale::StorageUnit;
    ///
    /// assert_eq!(StorageUnit::scale(1023.0), (StorageUnit::Byte, 1023.0));
    /// assert_eq!(StorageUnit::scale(1536.0), (StorageUnit::Kb, 1.5));
    /// ```
    pub fn scale(bytes: f64) -> (StorageUnit, f64) {
        let mut size = bytes;
        let mut step = 0;
        while size >= KILO && step < Self::LADDER.len() - 1 {
            size /= KILO;
            step += 1;
        }
        (Self::LADDER[step], size)
    }

    /// Catalog key of this unit under `number.human.storage_units.units`.
    pub fn key(self) -> &'static str {
        match self {
            StorageUnit::Byte => "byte",
            StorageUnit::Kb => "kb",
            StorageUnit::Mb => "mb",
            StorageUnit::Gb => "gb",
            StorageUnit::Tb => "tb",
        }
    }

    /// Default precision for a quantity in this unit.
    pub fn precision(self, size: f64) -> usize {
        if self == StorageUnit::Byte || size.fract() == 0.0 {
            0
        } else {
            1
        }
    }
}

/// Format a number with grouping and a fixed number of decimals.
///
/// ```
/// use dotlocale::{format_number, NumberFormat};
///
/// let format = NumberFormat::builder().precision(2).build();
/// assert_eq!(format_number(1234.5, &format), "1,234.50");
///
/// let format = NumberFormat::builder().precision(0).build();
/// assert_eq!(format_number(-42.0, &format), "-42");
/// ```
pub fn format_number(number: f64, format: &NumberFormat) -> String {
    render_number(
        number,
        format.precision,
        &format.delimiter,
        format.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR),
        format.strip_insignificant_zeros,
    )
}

pub(crate) fn render_number(
    number: f64,
    precision: usize,
    delimiter: &str,
    separator: &str,
    strip_insignificant_zeros: bool,
) -> String {
    if !number.is_finite() {
        return number.to_string();
    }

    let fixed = to_fixed(number.abs(), precision);
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (fixed.as_str(), ""),
    };
    let fraction = if strip_insignificant_zeros {
        fraction.trim_end_matches('0')
    } else {
        fraction
    };

    let mut output = String::with_capacity(fixed.len() + separator.len());
    if number < 0.0 {
        output.push('-');
    }
    output.push_str(&group_digits(integer, delimiter));
    if !fraction.is_empty() {
        output.push_str(separator);
        output.push_str(fraction);
    }
    output
}

/// Fix a non-negative number to `precision` decimals, rounding halves up.
///
/// Rounding looks at the exact decimal expansion of the binary value, so
/// `2.5` becomes `3` while `1.005` (stored just below) stays `1.00`.
fn to_fixed(number: f64, precision: usize) -> String {
    if precision >= EXACT_FRACTION_DIGITS {
        return format!("{:.*}", precision, number);
    }
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, number);
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = fraction
        .as_bytes()
        .get(precision)
        .is_some_and(|digit| *digit >= b'5');

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(precision))
        .collect();
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let integer_len = digits.len() - precision;
    let mut fixed = String::with_capacity(digits.len() + 1);
    for (index, digit) in digits.iter().enumerate() {
        if index == integer_len {
            fixed.push('.');
        }
        fixed.push(char::from(*digit));
    }
    fixed
}

/// Insert `delimiter` between groups of three digits, counting from the right.
fn group_digits(digits: &str, delimiter: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + delimiter.len() * 4);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push_str(delimiter);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_from_the_right() {
        assert_eq!(group_digits("1", ","), "1");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("1234", ","), "1,234");
        assert_eq!(group_digits("1234567", " "), "1 234 567");
    }

    #[test]
    fn strips_zeros_and_bare_separator() {
        assert_eq!(render_number(1.5, 3, ",", ".", true), "1.5");
        assert_eq!(render_number(2.0, 3, ",", ".", true), "2");
        assert_eq!(render_number(2.0, 3, ",", ".", false), "2.000");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(3.25, 1), "3.3");
    }

    #[test]
    fn rounding_uses_the_stored_value() {
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.126, 2), "0.13");
        assert_eq!(to_fixed(2.0, 3), "2.000");
    }

    #[test]
    fn carry_adds_an_integer_digit() {
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(99.96, 1), "100.0");
        assert_eq!(to_fixed(0.0, 0), "0");
    }

    #[test]
    fn small_negative_keeps_sign() {
        assert_eq!(render_number(-0.0001, 3, ",", ".", false), "-0.000");
    }

    #[test]
    fn scale_caps_at_terabytes() {
        let (unit, size) = StorageUnit::scale(1024f64.powi(5));
        assert_eq!(unit, StorageUnit::Tb);
        assert_eq!(size, 1024.0);
    }
}
