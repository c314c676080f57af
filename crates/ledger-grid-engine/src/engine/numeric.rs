//! Locale-ambiguous number parsing and formatting.
//!
//! Accounting users type amounts like `1.234.567,5` (Vietnamese convention) or
//! `1,234,567.5` (English convention), and frequently mix them. The parser is
//! configured with a preferred [`NumericLocale`] but also accepts the other
//! convention whenever the input is unambiguous:
//!
//! 1. Both separators present: the right-most one is the decimal mark.
//! 2. One separator repeated: it groups thousands, three digits per group.
//! 3. One separator once: the locale's decimal mark is a decimal mark; the
//!    other one groups thousands when exactly three digits follow it and
//!    one to three digits, not starting with `0`, precede it.

use serde::{Deserialize, Serialize};

/// Preferred separator convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericLocale {
    /// `1.234.567,89`
    #[default]
    Vi,
    /// `1,234,567.89`
    En,
}

impl NumericLocale {
    pub fn decimal_separator(self) -> char {
        match self {
            NumericLocale::Vi => ',',
            NumericLocale::En => '.',
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            NumericLocale::Vi => '.',
            NumericLocale::En => ',',
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumericLocaleParser {
    locale: NumericLocale,
}

impl NumericLocaleParser {
    pub fn new(locale: NumericLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> NumericLocale {
        self.locale
    }

    /// Parse user text as a finite number. Accepts a leading sign and
    /// accounting-style parenthesised negatives.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let mut s = text.trim();
        let mut negative = false;

        if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
            negative = true;
            s = s[1..s.len() - 1].trim();
        }
        if let Some(rest) = s.strip_prefix('-') {
            negative = !negative;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('+') {
            s = rest;
        }

        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b',') {
            return None;
        }

        let decimal = self.decimal_mark(s)?;
        let integer = match decimal {
            Some(mark) => s.split(mark).next().unwrap_or_default(),
            None => s,
        };
        if let Some(group_mark) = integer.chars().find(|c| !c.is_ascii_digit())
            && !is_grouped(integer, group_mark)
        {
            return None;
        }
        let mut normalized = String::with_capacity(s.len());
        let mut seen_decimal = false;
        for c in s.chars() {
            match c {
                '0'..='9' => normalized.push(c),
                _ if Some(c) == decimal => {
                    if seen_decimal {
                        return None;
                    }
                    seen_decimal = true;
                    normalized.push('.');
                }
                // Grouping marks are only valid before the decimal mark.
                _ if seen_decimal => return None,
                _ => {}
            }
        }

        let value: f64 = normalized.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(if negative { -value } else { value })
    }

    pub fn is_number(&self, text: &str) -> bool {
        self.parse(text).is_some()
    }

    /// Decide which separator (if any) acts as the decimal mark.
    /// The outer `Option` is `None` when the text is not a valid number.
    fn decimal_mark(&self, s: &str) -> Option<Option<char>> {
        let dots = s.matches('.').count();
        let commas = s.matches(',').count();

        match (dots, commas) {
            (0, 0) => Some(None),
            (d, c) if d > 0 && c > 0 => {
                let last_dot = s.rfind('.')?;
                let last_comma = s.rfind(',')?;
                let mark = if last_dot > last_comma { '.' } else { ',' };
                let mark_count = if mark == '.' { d } else { c };
                (mark_count == 1).then_some(Some(mark))
            }
            (count, 0) => Some(self.single_kind_mark(s, '.', count)),
            (0, count) => Some(self.single_kind_mark(s, ',', count)),
            _ => None,
        }
    }

    fn single_kind_mark(&self, s: &str, sep: char, count: usize) -> Option<char> {
        if count > 1 {
            return None;
        }
        if sep == self.locale.decimal_separator() {
            return Some(sep);
        }
        let digits_after = s
            .rsplit(sep)
            .next()
            .map(|tail| tail.len())
            .unwrap_or_default();
        let head = s.split(sep).next().unwrap_or_default();
        if digits_after == 3 && is_leading_group(head) {
            None
        } else {
            Some(sep)
        }
    }

    /// Format with grouping and a fixed number of decimals in the configured
    /// locale, e.g. `1234567.891` with 2 decimals -> `1.234.567,89` (vi).
    pub fn format(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return super::format_number(value);
        }
        let fixed = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let group = self.locale.group_separator();
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(group);
            }
            grouped.push(c);
        }

        let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
        let mut out = String::new();
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push(self.locale.decimal_separator());
            out.push_str(frac);
        }
        out
    }

    /// Exact digits with the locale decimal mark and no grouping, which
    /// [`parse`](Self::parse) reads back as the same value.
    pub fn format_literal(&self, value: f64) -> String {
        let decimal = self.locale.decimal_separator().to_string();
        format!("{}", value).replace('.', &decimal)
    }

    /// Format with grouping, keeping only the significant fractional digits.
    pub fn format_auto(&self, value: f64) -> String {
        let plain = super::format_number(value);
        let decimals = plain.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
        self.format(value, decimals)
    }
}

/// First group of a grouped number: one to three digits, no leading zero.
fn is_leading_group(head: &str) -> bool {
    (1..=3).contains(&head.len()) && !head.starts_with('0')
}

/// `1.234.567`: a leading group, then groups of exactly three digits.
fn is_grouped(integer: &str, mark: char) -> bool {
    let mut groups = integer.split(mark);
    groups.next().is_some_and(is_leading_group) && groups.all(|g| g.len() == 3)
}
