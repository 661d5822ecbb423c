//! Monetary amounts next to a currency marker or between two anchor phrases.

use crate::constants::{CHARGE_CONTEXT_RANGE, CHARGE_PLACEHOLDER};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// An amount in its textual form, e.g. `12,34`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge(String);

impl Charge {
    pub fn new(amount: impl Into<String>) -> Self {
        Self(amount.into())
    }

    /// Stand-in for an amount the user has to fill in by hand
    pub fn placeholder() -> Self {
        Self(CHARGE_PLACEHOLDER.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == CHARGE_PLACEHOLDER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Charge {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for Charge {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Amount followed by `EUR` or `€`, optionally separated by one of `-_ `
static EURO_CHARGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:.+[-_ ])?(?P<amount>\d+(?:[,.]\d+)?)[-_ ]?(?:EUR|€)(?:[-_ .].+)?$")
        .expect("charge pattern is valid")
});

/// True if the single-line string contains an amount with a € currency
pub fn has_charge(text: &str) -> bool {
    EURO_CHARGE.is_match(text)
}

/// First amount with a € currency, in its original decimal separator form
pub fn get_charge(text: &str) -> Option<Charge> {
    EURO_CHARGE
        .captures(text)
        .map(|caps| Charge::new(&caps["amount"]))
}

/// Amount with two decimals found at most a few non-digits after `before`
/// and before `after`. The separator is normalized to a comma.
pub fn get_charge_from_context(text: &str, before: &str, after: &str) -> Option<Charge> {
    let pattern = format!(
        concat!(
            r".*{before}\D{{0,{range}}}",
            r"(?P<units>\d{{1,6}})[,.](?P<cents>\d{{2}})",
            r"\D{{0,{range}}}{after}",
        ),
        before = regex::escape(before),
        after = regex::escape(after),
        range = CHARGE_CONTEXT_RANGE,
    );

    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::error!("could not build charge context pattern: {}", e);
            return None;
        }
    };

    match re.captures(text) {
        Some(caps) => Some(Charge::new(format!("{},{}", &caps["units"], &caps["cents"]))),
        None => {
            tracing::warn!(
                "Sorry, I was not able to extract a charge for this file, please fix manually"
            );
            tracing::debug!(
                "no charge between [{}] and [{}] within [{}...]",
                before,
                after,
                text.chars().take(30).collect::<String>()
            );
            None
        }
    }
}

/// Charge from the text context, else from the file name, else the placeholder
pub fn get_charge_from_context_or_name(
    text: &str,
    before: &str,
    after: &str,
    name: &str,
) -> Charge {
    get_charge_from_context(text, before, after)
        .or_else(|| get_charge(name))
        .unwrap_or_else(Charge::placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_charge() {
        assert_eq!(get_charge("12,34EUR").unwrap(), "12,34");
        assert_eq!(get_charge("12EUR").unwrap(), "12");
        assert_eq!(get_charge("foo bar baz"), None);
    }

    #[test]
    fn test_get_charge_inside_file_name() {
        assert_eq!(get_charge("2016-03-05 a1 12,34 €.pdf").unwrap(), "12,34");
        assert_eq!(get_charge("2016-01-19 bill foobar baz 12.12EUR.pdf").unwrap(), "12.12");
        assert_eq!(get_charge("VBV Kontoinformation 123_EUR -- scan").unwrap(), "123");
    }

    #[test]
    fn test_has_charge() {
        assert!(has_charge("foo 1,2 EUR"));
        assert!(!has_charge("foo EUR"));
        assert!(!has_charge("foo12EUR"));
    }

    #[test]
    fn test_get_charge_from_context() {
        assert_eq!(get_charge_from_context("foo12,34EURbar", "foo", "bar").unwrap(), "12,34");
        assert_eq!(get_charge_from_context("foo xxxx 12.34 xxxx bar", "foo", "bar"), None);
    }

    #[test]
    fn test_context_window_boundary() {
        let five = "foo xxx 12.34 xxx bar";
        assert_eq!(get_charge_from_context(five, "foo", "bar").unwrap(), "12,34");
        assert_eq!(get_charge_from_context("foo xxxx 12.34 xxx bar", "foo", "bar"), None);
        assert_eq!(get_charge_from_context("foo xxx 12.34 xxxx bar", "foo", "bar"), None);
    }

    #[test]
    fn test_get_charge_from_context_normalizes_separator() {
        let charge = get_charge_from_context("Offen 47.50 Zahlungen", "Offen", "Zahlungen");
        assert_eq!(charge.unwrap(), "47,50");
    }

    #[test]
    fn test_context_anchors_are_literal() {
        let text = "steuerenthalten.EUR 99,90Wird";
        assert_eq!(get_charge_from_context(text, "enthalten.EUR", "Wird").unwrap(), "99,90");
        let text = "enthaltenXEUR 99,90Wird";
        assert_eq!(get_charge_from_context(text, "enthalten.EUR", "Wird"), None);
    }

    #[test]
    fn test_fallback_to_name_then_placeholder() {
        let name = "2015-11-20 Kirche 8,00 EUR.pdf";
        let charge = get_charge_from_context_or_name("nothing here", "a", "b", name);
        assert_eq!(charge, "8,00");
        assert!(!charge.is_placeholder());

        let name = "2015-11-20 Kirche.pdf";
        let charge = get_charge_from_context_or_name("nothing here", "a", "b", name);
        assert!(charge.is_placeholder());
        assert_eq!(charge.to_string(), "FIXXME");
    }
}
