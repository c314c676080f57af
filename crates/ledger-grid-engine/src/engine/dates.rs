//! Date text helpers for the two formats the grid understands:
//! `DD/MM/YYYY` (display and entry format) and ISO `YYYY-MM-DD`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn dmy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid DD/MM/YYYY regex"))
}

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date regex"))
}

/// Parse strict `DD/MM/YYYY`. Impossible dates (31/02/2024) are rejected.
pub fn parse_dmy(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if !dmy_re().is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}

/// Parse strict ISO `YYYY-MM-DD`.
pub fn parse_iso(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if !iso_re().is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse either supported format.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_dmy(text).or_else(|| parse_iso(text))
}

pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
