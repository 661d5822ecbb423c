//! Rules that derive a new name from the old file name alone.
//!
//! Device and app naming conventions come first, followed by keyword
//! heuristics for scanned documents. Keywords are matched exactly and case
//! sensitively to keep false positives on short tokens away.

use crate::charge::{get_charge, has_charge};
use crate::constants::{keys, MONTH_NAMES};
use crate::matcher::{contains_all_of, contains_one_of};
use crate::patterns::{self, DAY, TIMESTAMP_DELIMITERS};
use crate::rules::{FnRule, NewName, RuleInput, RuleRegistry, TemplateRule};
use crate::template::{all, group, lit, Element, Template};
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RULES: Lazy<RuleRegistry> = Lazy::new(build_name_rules);

/// The name rules in priority order
pub fn name_rules() -> RuleRegistry {
    NAME_RULES.clone()
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("name rule pattern is valid")
}

/// `year-month-dayThour.minute[.second]`
fn iso_timestamp() -> Vec<Element> {
    vec![
        group("year"),
        lit("-"),
        group("month"),
        lit("-"),
        group("day"),
        lit("T"),
        group("hour"),
        lit("."),
        group("minute"),
        all([lit("."), group("second")]),
    ]
}

fn with_timestamp(rest: impl IntoIterator<Item = Element>) -> Template {
    Template::new(iso_timestamp().into_iter().chain(rest))
}

fn build_name_rules() -> RuleRegistry {
    let datestamp = patterns::datestamp();
    let timestamp = patterns::timestamp();
    let fuzzy_timestamp = patterns::fuzzy_timestamp();
    let d = TIMESTAMP_DELIMITERS;

    RuleRegistry::new()
        .with(FnRule::new("salary", salary))
        // Screenshot_2013-03-05-08-14-09.png
        .with(TemplateRule::new(
            "android-screenshot",
            compile(
                r"^Screenshot_(?P<year>[12]\d{3})-?(?P<month>[01]\d)-?(?P<day>[0123]\d)-?(?P<hour>[012]\d).?(?P<minute>[012345]\d)(?:.?(?P<second>[012345]\d))?(?P<description> .*)?\.png$",
            ),
            with_timestamp([group("description"), lit(" -- screenshots android.png")]),
        ))
        // C112345678901EUR20150930001.pdf
        .with(TemplateRule::new(
            "bank-austria-statement",
            compile(
                r"^C1(?P<account>\d{11})EUR(?P<year>\d{4})(?P<month>\d{2})(?P<day>\d{2})(?P<seq>\d{3})\.pdf$",
            ),
            Template::new([
                group("year"),
                lit("-"),
                group("month"),
                lit("-"),
                group("day"),
                lit(" Bank Austria Kontoauszug "),
                group("year"),
                lit("-"),
                group("seq"),
                lit(" "),
                group("account"),
                lit(".pdf"),
            ]),
        ))
        // 2017-11-05T10.56.11_IKS-00000000512345678901234567890.csv
        .with(TemplateRule::new(
            "bank-austria-transactions",
            compile(&format!(
                r"^(?P<daytime>{})_IKS-(?P<iks>\d{{29}})\.csv$",
                patterns::daytime()
            )),
            Template::new([
                group("daytime"),
                lit(" Bank Austria Umsatzliste IKS-"),
                group("iks"),
                lit(".csv"),
            ]),
        ))
        // MediathekView target "%DT%d h%i %s %t - %T - %N.mp4"
        .with(
            TemplateRule::new(
                "mediathekview",
                compile(&format!(
                    r"^{datestamp}T?{timestamp}(?P<description>.+?)(?: - [12]\d{{3}}{d}[01]\d{d}[0123]\d_.+)?\.mp4$"
                )),
                with_timestamp([group("description"), lit(".mp4")]),
            )
            .underscores_to_spaces(),
        )
        // OSMTracker: 2015-05-27T09;00;15_foo_bar.gpx
        .with(
            TemplateRule::new(
                "osmtracker",
                compile(&format!(
                    r"^{datestamp}T?{timestamp}(?P<description>_.*)?\.gpx$"
                )),
                with_timestamp([group("description"), lit(".gpx")]),
            )
            .underscores_to_spaces(),
        )
        // IMG_20161014_214404 foo bar.jpg
        .with(TemplateRule::new(
            "camera-image",
            compile(&format!(
                r"^IMG_{datestamp}_{timestamp}(?:_Bokeh)?(?P<description>.+)?\.jpg$"
            )),
            with_timestamp([group("description"), lit(".jpg")]),
        ))
        // VID_20170105_173104.mp4
        .with(TemplateRule::new(
            "camera-video",
            compile(&format!(
                r"^VID_{datestamp}_{timestamp}(?P<description>.+)?\.mp4$"
            )),
            with_timestamp([group("description"), lit(".mp4")]),
        ))
        // rec_20171129-0902 A nice recording .wav
        .with(TemplateRule::new(
            "recorder",
            compile(
                r"^rec_(?P<year>[12]\d{3})(?P<month>[01]\d)(?P<day>[0123]\d)-(?P<hour>[012]\d)(?P<minute>[012345]\d)\s*(?P<description>.*?)\s*\.(?P<extension>wav|mp3)$",
            ),
            with_timestamp([
                all([lit(" "), group("description")]),
                lit("."),
                group("extension"),
            ]),
        ))
        .with(FnRule::new("a1-bill", a1_bill))
        .with(FnRule::new("gvb-10er-block", gvb_10er_block))
        .with(FnRule::new("generic-bill", generic_bill))
        .with(FnRule::new("fh-honorar", fh_honorar))
        .with(FnRule::new("salary-slip", salary_slip))
        .with(FnRule::new("game-result", game_result))
        .with(FnRule::new("vbv-statement", vbv_statement))
        .with(FnRule::new("water-reading", water_reading))
        .with(FnRule::new("hipster-pda", hipster_pda))
        // xfce screenshot tool: Screenshot_2017-11-07_07-52-59 my description.png
        .with(TemplateRule::new(
            "xfce-screenshot",
            compile(&format!(
                r"^Screenshot_(?P<day>{DAY})_{fuzzy_timestamp}(?P<description>.*)\.png$"
            )),
            Template::new([
                group("day"),
                lit("T"),
                group("hour"),
                lit("."),
                group("minute"),
                all([lit("."), group("second")]),
                group("description"),
                lit(" -- screenshots.png"),
            ]),
        ))
        // OsmAnd: 2017-12-07_09-23_Thu Went for a walk .gpx
        .with(TemplateRule::new(
            "osmand-track",
            compile(&format!(
                r"^(?P<day>{DAY})_{fuzzy_timestamp}_(?P<weekday>\w{{3}}) ?(?P<description>.*?)\s*\.gpx$"
            )),
            Template::new([
                group("day"),
                lit("T"),
                group("hour"),
                lit("."),
                group("minute"),
                all([lit("."), group("second")]),
                all([lit(" "), group("description")]),
                lit(".gpx"),
            ]),
        ))
}

/// Payslip PDFs named by the payroll software; the salary belongs to the
/// previous month when it arrives in the first half of a month.
fn salary(input: &RuleInput<'_>) -> Option<NewName> {
    static DATE: Lazy<Regex> = Lazy::new(|| compile(&format!("^{}", patterns::datestamp())));

    if !input.components.has_extension("PDF") {
        return None;
    }
    let startstring = input.lookup(keys::SALARY_STARTSTRING)?;
    if !input.name.contains(startstring) {
        return None;
    }
    let temporal = input.temporal()?;
    let description = input.lookup(keys::SALARY_DESCRIPTION)?;

    let caps = DATE.captures(temporal)?;
    let mut month: usize = caps["month"].parse().ok()?;
    let day: usize = caps["day"].parse().ok()?;
    if day < 15 {
        month = month.checked_sub(1)?;
    }
    let month_name = MONTH_NAMES.get(month)?;

    if let Some(password) = input.lookup(keys::SALARY_PDF_PASSWORD) {
        tracing::info!("PDF file password: {}", password);
    }

    Some(NewName::new(format!(
        "{temporal} {description} {month_name} - € -- detego private.pdf"
    )))
}

/// Keyword rules only rename scanned documents, never photos or recordings
/// whose normalized name happens to contain the keyword.
fn is_scan(input: &RuleInput<'_>) -> bool {
    input.components.has_extension_ignore_case("pdf")
}

/// 2015-11-24 Rechnung A1 Festnetz-Internet 12,34€ -- scan bill.pdf
fn a1_bill(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !contains_one_of(input.name, &[" A1 ", " a1 "]) {
        return None;
    }
    let charge = get_charge(input.name)?;
    let temporal = input.temporal()?;
    Some(NewName::new(format!(
        "{temporal} A1 Festnetz-Internet {charge}€{}.pdf",
        input.components.tag_block_with(&["scan", "bill"])
    )))
}

/// 2016-01-19--2016-02-12 benutzter GVB 10er Block -- scan transportation graz.pdf
fn gvb_10er_block(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !contains_one_of(input.name, &["10er"]) {
        return None;
    }
    let temporal = input.temporal()?;
    Some(NewName::new(format!(
        "{temporal} benutzter GVB 10er Block{}.pdf",
        input.components.tag_block_with(&["scan", "transportation", "graz"])
    )))
}

/// 2016-01-19 bill foobar baz 12,12EUR.pdf -> 2016-01-19 foobar baz 12,12€ -- scan bill.pdf
fn generic_bill(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !input.name.contains("bill") || !has_charge(input.name) {
        return None;
    }
    let temporal = input.temporal()?;
    let description = input
        .components
        .base
        .replace(" bill", " ")
        .replace("bill ", " ")
        .replace("  ", " ")
        .replace("EUR", "€");
    Some(NewName::new(format!(
        "{temporal} {}{}.pdf",
        description.trim(),
        input.components.tag_block_with(&["scan", "bill"])
    )))
}

/// 2015-04-30 FH St.Poelten - Abrechnungsbeleg 12,34 EUR - Honorar -- scan fhstp.pdf
fn fh_honorar(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !contains_all_of(input.name, &[" FH ", "Abrechnungsbeleg"]) {
        return None;
    }
    let charge = get_charge(input.name)?;
    let temporal = input.temporal()?;
    Some(NewName::new(format!(
        "{temporal} FH St.Poelten - Abrechnungsbeleg {charge}€ Honorar{}.pdf",
        input.components.tag_block_with(&["scan", "fhstp"])
    )))
}

/// 2016-02-26 Gehaltszettel Februar 12,34 EUR -- scan infonova.pdf
fn salary_slip(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !contains_all_of(input.name, &["Gehalt", "infonova"]) {
        return None;
    }
    let charge = get_charge(input.name)?;
    let temporal = input.temporal()?;
    Some(NewName::new(format!(
        "{temporal} Gehaltszettel {charge}€{}.pdf",
        input.components.tag_block_with(&["scan", "infonova"])
    )))
}

/// 2012-05-26T22.25.12 IMAG0861 Rage.jpg -> ... IMAG0861 Rage - Ergebnis -- games.jpg
fn game_result(input: &RuleInput<'_>) -> Option<NewName> {
    let base = &input.components.base;
    if !contains_one_of(base, &["Hive", "Rage", "Stratego"])
        || !input.components.has_extension_ignore_case("jpg")
        || has_charge(input.name)
        || base.contains(" - Ergebnis")
    {
        return None;
    }
    let prefix = input
        .temporal()
        .map(|t| format!("{t} "))
        .unwrap_or_default();
    Some(NewName::new(format!(
        "{prefix}{base} - Ergebnis{}.jpg",
        input.components.tag_block_with(&["games"])
    )))
}

/// 2015-03-11 VBV Kontoinformation 123 EUR -- scan finance infonova.pdf
fn vbv_statement(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !contains_all_of(input.name, &["VBV", "Kontoinformation"]) {
        return None;
    }
    let charge = get_charge(input.name)?;
    let temporal = input.temporal()?;
    Some(NewName::new(format!(
        "{temporal} VBV Kontoinformation {charge}€{}.pdf",
        input.components.tag_block_with(&["scan", "finance", "infonova"])
    )))
}

/// 2015-03-11 Verbrauchsablesung Wasser - Holding Graz -- scan bwg.pdf
fn water_reading(input: &RuleInput<'_>) -> Option<NewName> {
    if !is_scan(input) || !contains_all_of(input.name, &["Verbrauchsablesung", "Wasser"]) {
        return None;
    }
    let temporal = input.temporal()?;
    Some(NewName::new(format!(
        "{temporal} Verbrauchsablesung Wasser - Holding Graz{}.pdf",
        input.components.tag_block_with(&["scan", "bwg"])
    )))
}

/// 2017-08-16-2017-09-23 Hipster-PDA vollgeschrieben -- scan notes.png
///
/// Photos of the notes are dated by day; a time of day or a screenshot tag
/// means the file is a timestamped capture and not a scan.
fn hipster_pda(input: &RuleInput<'_>) -> Option<NewName> {
    let temporal = input.temporal()?;
    if temporal.contains('T')
        || input.components.tags.contains("screenshots")
        || !contains_one_of(input.name, &["hipster", "Hipster"])
    {
        return None;
    }
    let extension = input.components.extension.as_deref()?;
    Some(NewName::new(format!(
        "{temporal} Hipster-PDA vollgeschrieben -- scan notes.{extension}"
    )))
}
