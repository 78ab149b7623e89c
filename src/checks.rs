//! Ready-made checks for the step operators.
//!
//! Each function takes the failure to report and returns a closure in one of
//! the shapes the accumulator accepts:
//!
//! - `&A -> Option<F>` for [`dispute_with`](crate::Accumulator::dispute_with)
//!   and [`dispute_each_with`](crate::Accumulator::dispute_each_with)
//! - `A -> Result<B, F>` for [`refute_with`](crate::Accumulator::refute_with)
//!   and [`refute_each_with`](crate::Accumulator::refute_each_with)
//!
//! Lengths are counted in Unicode scalar values.
//!
//! # Example
//!
//! ```rust
//! use verdict::{checks, Validate};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Failure { Required, TooShort, NotNumeric }
//!
//! let acc = Validate::field("pin", Some("12a".to_string()))
//!     .refute_with(checks::required(Failure::Required))
//!     .dispute_with(checks::min_len(4, Failure::TooShort))
//!     .dispute_with(checks::numeric(Failure::NotNumeric));
//!
//! assert!(acc.is_disputed());
//! assert_eq!(acc.failures().unwrap().len(), 2);
//! ```

use std::str::FromStr;

use regex::Regex;

/// Fails with `failure` when the value is absent; otherwise unwraps it.
pub fn required<A, F>(failure: F) -> impl Fn(Option<A>) -> Result<A, F>
where
    F: Clone,
{
    move |value| value.ok_or_else(|| failure.clone())
}

/// Parses a string into `T`, failing with `failure` when it does not parse.
pub fn parse<S, T, F>(failure: F) -> impl Fn(S) -> Result<T, F>
where
    S: AsRef<str>,
    T: FromStr,
    F: Clone,
{
    move |value| value.as_ref().trim().parse().map_err(|_| failure.clone())
}

/// Fails when the string is empty.
pub fn not_empty<S, F>(failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| value.as_ref().is_empty().then(|| failure.clone())
}

/// Fails when the string is empty or only whitespace.
pub fn not_blank<S, F>(failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| value.as_ref().trim().is_empty().then(|| failure.clone())
}

/// Fails when the string has fewer than `min` characters.
pub fn min_len<S, F>(min: usize, failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| (char_len(value.as_ref()) < min).then(|| failure.clone())
}

/// Fails when the string has more than `max` characters.
pub fn max_len<S, F>(max: usize, failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| (char_len(value.as_ref()) > max).then(|| failure.clone())
}

/// Fails unless the string has exactly `len` characters.
pub fn exact_len<S, F>(len: usize, failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| (char_len(value.as_ref()) != len).then(|| failure.clone())
}

/// Fails unless the string has between `min` and `max` characters, inclusive.
pub fn len_between<S, F>(min: usize, max: usize, failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| {
        let len = char_len(value.as_ref());
        (len < min || len > max).then(|| failure.clone())
    }
}

/// Fails unless the string is non-empty and made only of ASCII digits.
pub fn numeric<S, F>(failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| {
        let value = value.as_ref();
        (value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit())).then(|| failure.clone())
    }
}

/// Fails unless the string looks like an email address: a non-empty local
/// part, a single `@`, and a dotted domain without whitespace.
pub fn email<S, F>(failure: F) -> impl Fn(&S) -> Option<F>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    move |value| (!looks_like_email(value.as_ref())).then(|| failure.clone())
}

/// Fails unless the string matches the regular expression `pattern`.
///
/// Returns an error if the pattern does not compile.
///
/// # Example
///
/// ```rust
/// use verdict::checks;
///
/// let check = checks::pattern(r"^[a-z]+$", "lowercase only").unwrap();
/// assert_eq!(check("abc"), None);
/// assert_eq!(check("ABC"), Some("lowercase only"));
///
/// assert!(checks::pattern::<str, _>("(", "never").is_err());
/// ```
pub fn pattern<S, F>(pattern: &str, failure: F) -> Result<impl Fn(&S) -> Option<F>, regex::Error>
where
    S: AsRef<str> + ?Sized,
    F: Clone,
{
    let regex = Regex::new(pattern)?;
    Ok(move |value: &S| (!regex.is_match(value.as_ref())).then(|| failure.clone()))
}

/// Fails when the value is below `bound`.
pub fn min<T, F>(bound: T, failure: F) -> impl Fn(&T) -> Option<F>
where
    T: PartialOrd,
    F: Clone,
{
    move |value| (*value < bound).then(|| failure.clone())
}

/// Fails when the value is above `bound`.
pub fn max<T, F>(bound: T, failure: F) -> impl Fn(&T) -> Option<F>
where
    T: PartialOrd,
    F: Clone,
{
    move |value| (*value > bound).then(|| failure.clone())
}

/// Fails when a collection has fewer than `min` elements.
pub fn min_items<T, F>(min: usize, failure: F) -> impl Fn(&Vec<T>) -> Option<F>
where
    F: Clone,
{
    move |items| (items.len() < min).then(|| failure.clone())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let check = required("missing");
        assert_eq!(check(Some(3)), Ok(3));
        assert_eq!(check(None::<i32>), Err("missing"));
    }

    #[test]
    fn test_parse() {
        let check = parse::<&str, u16, _>("nan");
        assert_eq!(check(" 80 "), Ok(80));
        assert_eq!(check("port"), Err("nan"));
    }

    #[test]
    fn test_not_empty_and_not_blank() {
        assert_eq!(not_empty("empty")(""), Some("empty"));
        assert_eq!(not_empty("empty")(" "), None);
        assert_eq!(not_blank("blank")(" \t"), Some("blank"));
        assert_eq!(not_blank("blank")("x"), None);
    }

    #[test]
    fn test_lengths_count_chars() {
        assert_eq!(min_len(3, "short")("日本語"), None);
        assert_eq!(max_len(2, "long")("日本語"), Some("long"));
        assert_eq!(exact_len(3, "len")("abc"), None);
        assert_eq!(exact_len(3, "len")("ab"), Some("len"));
        assert_eq!(len_between(2, 4, "range")("a"), Some("range"));
        assert_eq!(len_between(2, 4, "range")("abcd"), None);
        assert_eq!(len_between(2, 4, "range")("abcde"), Some("range"));
    }

    #[test]
    fn test_numeric() {
        let check = numeric("digits");
        assert_eq!(check("0123"), None);
        assert_eq!(check("12a"), Some("digits"));
        assert_eq!(check(""), Some("digits"));
        assert_eq!(check("-1"), Some("digits"));
    }

    #[test]
    fn test_email() {
        let check = email("format");
        assert_eq!(check("user@example.com"), None);
        assert_eq!(check("bad"), Some("format"));
        assert_eq!(check("@example.com"), Some("format"));
        assert_eq!(check("a@b@c.com"), Some("format"));
        assert_eq!(check("user@localhost"), Some("format"));
        assert_eq!(check("us er@example.com"), Some("format"));
        assert_eq!(check("user@.com"), Some("format"));
    }

    #[test]
    fn test_pattern() {
        let check = pattern::<str, _>(r"^\d{3}-\d{4}$", "phone").unwrap();
        assert_eq!(check("555-1234"), None);
        assert_eq!(check("5551234"), Some("phone"));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(min(1, "low")(&0), Some("low"));
        assert_eq!(min(1, "low")(&1), None);
        assert_eq!(max(10, "high")(&11), Some("high"));
        assert_eq!(max(10, "high")(&10), None);
    }

    #[test]
    fn test_min_items() {
        assert_eq!(min_items(1, "none")(&Vec::<u8>::new()), Some("none"));
        assert_eq!(min_items(1, "none")(&vec![1u8]), None);
    }
}
