//! Rebuild a string from the named capture groups of a regex match.

use crate::constants::TEMPLATE_ERROR_MARKER;
use regex::{Captures, Regex};

/// One element of a [`Template`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Appended verbatim
    Literal(String),
    /// Appended when the named group participated in the match
    Group(String),
    /// Appended only if every group inside participated with a non-empty value
    All(Vec<Element>),
}

pub fn lit(text: impl Into<String>) -> Element {
    Element::Literal(text.into())
}

pub fn group(name: impl Into<String>) -> Element {
    Element::Group(name.into())
}

pub fn all(elements: impl IntoIterator<Item = Element>) -> Element {
    Element::All(elements.into_iter().collect())
}

/// Ordered recipe of literals and capture groups
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    elements: Vec<Element>,
}

impl Template {
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Expand the template against a successful match
    pub fn render(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        append(&mut out, &self.elements, caps);
        tracing::debug!(
            matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
            result = %out,
            "template rendered"
        );
        out
    }

    /// Expand the template, or return the error marker when there is no match.
    /// Recognizers are expected to guard the call with a successful match.
    pub fn render_match(&self, caps: Option<&Captures<'_>>) -> String {
        match caps {
            Some(caps) => self.render(caps),
            None => {
                tracing::error!(
                    "no regex match given; check the match before rendering a template"
                );
                TEMPLATE_ERROR_MARKER.to_string()
            }
        }
    }

    /// Group names referenced by the template that `re` does not define
    pub fn unknown_groups(&self, re: &Regex) -> Vec<String> {
        let defined: Vec<&str> = re.capture_names().flatten().collect();
        let mut unknown = Vec::new();
        collect_groups(&self.elements, &mut |name| {
            if !defined.contains(&name) && !unknown.iter().any(|u| u == name) {
                unknown.push(name.to_string());
            }
        });
        unknown
    }
}

fn append(out: &mut String, elements: &[Element], caps: &Captures<'_>) {
    for element in elements {
        match element {
            Element::Literal(text) => out.push_str(text),
            Element::Group(name) => {
                if let Some(m) = caps.name(name) {
                    out.push_str(m.as_str());
                }
            }
            Element::All(inner) => {
                if all_present(inner, caps) {
                    append(out, inner, caps);
                }
            }
        }
    }
}

fn all_present(elements: &[Element], caps: &Captures<'_>) -> bool {
    elements.iter().all(|element| match element {
        Element::Literal(_) => true,
        Element::Group(name) => caps.name(name).map(|m| !m.as_str().is_empty()).unwrap_or(false),
        Element::All(inner) => all_present(inner, caps),
    })
}

fn collect_groups<'a>(elements: &'a [Element], f: &mut dyn FnMut(&'a str)) {
    for element in elements {
        match element {
            Element::Literal(_) => {}
            Element::Group(name) => f(name),
            Element::All(inner) => collect_groups(inner, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_template() -> Template {
        Template::new([
            group("hour"),
            lit("."),
            group("minute"),
            all([lit("."), group("second")]),
            lit(" done"),
        ])
    }

    fn time_regex() -> Regex {
        Regex::new(r"^(?P<hour>\d\d):(?P<minute>\d\d)(?::(?P<second>\d\d))?(?P<rest>.*)$").unwrap()
    }

    #[test]
    fn test_render_with_optional_group_present() {
        let re = time_regex();
        let caps = re.captures("10:32:12").unwrap();
        assert_eq!(time_template().render(&caps), "10.32.12 done");
    }

    #[test]
    fn test_render_skips_sub_template_of_absent_group() {
        let re = time_regex();
        let caps = re.captures("10:32").unwrap();
        assert_eq!(time_template().render(&caps), "10.32 done");
    }

    #[test]
    fn test_plain_group_absent_contributes_nothing() {
        let re = time_regex();
        let caps = re.captures("10:32").unwrap();
        let template = Template::new([group("hour"), group("second"), group("rest"), lit("!")]);
        assert_eq!(template.render(&caps), "10!");
    }

    #[test]
    fn test_empty_group_skips_sub_template() {
        let re = time_regex();
        let caps = re.captures("10:32").unwrap();
        let template = Template::new([group("hour"), all([lit(" "), group("rest")])]);
        assert_eq!(template.render(&caps), "10");
    }

    #[test]
    fn test_nested_sub_templates_are_all_or_nothing() {
        let re = time_regex();
        let template = Template::new([
            group("hour"),
            all([lit("+"), group("minute"), all([lit(":"), group("second")])]),
        ]);
        assert_eq!(template.render(&re.captures("10:32:12").unwrap()), "10+32:12");

        let outer_requires_nested = Template::new([
            group("hour"),
            all([lit("+"), all([group("second")])]),
        ]);
        assert_eq!(outer_requires_nested.render(&re.captures("10:32").unwrap()), "10");
    }

    #[test]
    fn test_render_without_match_returns_marker() {
        assert_eq!(time_template().render_match(None), "ERROR");
    }

    #[test]
    fn test_group_used_twice() {
        let re = Regex::new(r"^(?P<year>\d{4})-(?P<seq>\d{3})$").unwrap();
        let caps = re.captures("2017-001").unwrap();
        let template =
            Template::new([group("year"), lit(" "), group("year"), lit("-"), group("seq")]);
        assert_eq!(template.render(&caps), "2017 2017-001");
    }

    #[test]
    fn test_unknown_groups() {
        let template = Template::new([group("hour"), all([group("nope")]), group("nope")]);
        assert_eq!(template.unknown_groups(&time_regex()), vec!["nope".to_string()]);
        assert!(time_template().unknown_groups(&time_regex()).is_empty());
    }
}
