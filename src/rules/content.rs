//! Rules that derive a new name from the text of a scanned PDF document.
//!
//! Scans come with OCR noise, so phrases are matched fuzzily. Every rule
//! needs a configuration provider and a temporal prefix in the old name.

use crate::charge::get_charge_from_context_or_name;
use crate::config::Lookup;
use crate::constants::keys;
use crate::matcher::fuzzy_contains_all_of;
use crate::rules::{FnRule, NewName, RuleInput, RuleRegistry};
use once_cell::sync::Lazy;

static CONTENT_RULES: Lazy<RuleRegistry> = Lazy::new(|| {
    RuleRegistry::new()
        .with(FnRule::new("easybank-tan-list", easybank_tan_list))
        .with(FnRule::new("church-tax", church_tax))
        .with(FnRule::new("generali-premium", generali_premium))
        .with(FnRule::new("merkur-premium", merkur_premium))
        .with(FnRule::new("loan-statement", loan_statement))
        .with(FnRule::new("a1-invoice", a1_invoice))
});

/// The content rules in priority order
pub fn content_rules() -> RuleRegistry {
    CONTENT_RULES.clone()
}

/// Content, configuration and temporal prefix, the common preconditions
struct Document<'a> {
    content: &'a str,
    lookup: &'a dyn Lookup,
    temporal: &'a str,
}

impl<'a> Document<'a> {
    fn from_input(input: &RuleInput<'a>) -> Option<Self> {
        Some(Self {
            content: input.content?,
            lookup: input.lookup?,
            temporal: input.temporal()?,
        })
    }

    fn value(&self, key: &str) -> Option<&'a str> {
        self.lookup.lookup(key)
    }
}

/// 2010-06-08 easybank - neue TAN-Liste -- scan private.pdf
fn easybank_tan_list(input: &RuleInput<'_>) -> Option<NewName> {
    let doc = Document::from_input(input)?;
    if !fuzzy_contains_all_of(
        doc.content,
        &["Transaktionsnummern (TANs)", "Ihre TAN-Liste in Verlust geraten"],
    ) {
        return None;
    }
    Some(NewName::new(format!(
        "{} easybank - neue TAN-Liste{}.pdf",
        doc.temporal,
        input.components.tag_block_with(&["scan", "private"])
    )))
}

/// 2015-11-20 Kirchenbeitrag 12,34€ -- scan taxes bill.pdf
fn church_tax(input: &RuleInput<'_>) -> Option<NewName> {
    let doc = Document::from_input(input)?;
    if !fuzzy_contains_all_of(doc.content, &["4294-0208", "AT086000000007042401"]) {
        return None;
    }
    let charge = get_charge_from_context_or_name(doc.content, "Offen", "Zahlungen", input.name);
    let new_name = format!(
        "{} Kirchenbeitrag {charge}€{}.pdf",
        doc.temporal,
        input.components.tag_block_with(&["scan", "taxes", "bill"])
    );
    Some(NewName::new(new_name).with_charge(&charge))
}

/// 2015-11-24 Generali Erhoehung Dynamikklausel - Praemie nun 12,34€ - Polizze 12345 -- scan bill.pdf
fn generali_premium(input: &RuleInput<'_>) -> Option<NewName> {
    let doc = Document::from_input(input)?;
    let policy = doc.value(keys::GENERALI_POLICY_NUMBER)?;
    if !doc.content.contains(policy)
        || !fuzzy_contains_all_of(
            doc.content,
            &[
                "ImHinblickaufdievereinbarteDynamikklauseltritteineWertsteigerunginKraft",
                "IhreangepasstePrämiebeträgtdahermonatlich",
                "AT44ZZZ00000002054",
            ],
        )
    {
        return None;
    }
    let charge = get_charge_from_context_or_name(
        doc.content,
        "IndiesemBetragistauchdiegesetzlicheVersicherungssteuerenthalten.EUR",
        "Wird",
        input.name,
    );
    let new_name = format!(
        "{} Generali Erhoehung Dynamikklausel - Praemie nun {charge}€ - Polizze {policy}{}.pdf",
        doc.temporal,
        input.components.tag_block_with(&["scan", "bill"])
    );
    Some(NewName::new(new_name).with_charge(&charge))
}

/// 2015-11-30 Merkur Lebensversicherung 123456 - Praemienzahlungsaufforderung 12,34€ -- scan bill.pdf
fn merkur_premium(input: &RuleInput<'_>) -> Option<NewName> {
    let doc = Document::from_input(input)?;
    let policy = doc.value(keys::MERKUR_POLICY_NUMBER)?;
    let reference = doc.value(keys::MERKUR_PAYMENT_REFERENCE)?;
    if !doc.content.contains(policy)
        || !fuzzy_contains_all_of(doc.content, &["Prämienvorschreibung", reference])
    {
        return None;
    }
    let charge = get_charge_from_context_or_name(
        doc.content,
        "EUR",
        "Gesundheit ist ein kostbares Gut",
        input.name,
    );
    let new_name = format!(
        "{} Merkur Lebensversicherung {policy} - Praemienzahlungsaufforderung {charge}€{}.pdf",
        doc.temporal,
        input.components.tag_block_with(&["scan", "bill"])
    );
    Some(NewName::new(new_name).with_charge(&charge))
}

/// 2016-02-22 BANK - Darlehnen - Kontomitteilung -- scan taxes.pdf
fn loan_statement(input: &RuleInput<'_>) -> Option<NewName> {
    let doc = Document::from_input(input)?;
    let institute = doc.value(keys::LOAN_INSTITUTE)?;
    let loan_id = doc.value(keys::LOAN_ID)?;
    if !fuzzy_contains_all_of(doc.content, &[institute, loan_id]) {
        return None;
    }
    Some(NewName::new(format!(
        "{} {institute} - Darlehnen - Kontomitteilung{}.pdf",
        doc.temporal,
        input.components.tag_block_with(&["scan", "taxes"])
    )))
}

/// 2015-11-24 A1 Festnetz-Internet 12,34€ -- scan bill.pdf
fn a1_invoice(input: &RuleInput<'_>) -> Option<NewName> {
    let doc = Document::from_input(input)?;
    let contract = doc.value(keys::PROVIDER_CONTRACT)?;
    let cue = doc.value(keys::PROVIDER_CUE)?;
    if !fuzzy_contains_all_of(doc.content, &[contract, cue]) {
        return None;
    }
    let charge = get_charge_from_context_or_name(
        doc.content,
        "\u{2022}",
        "Bei Online Zahlungen geben Sie",
        input.name,
    );
    let new_name = format!(
        "{} A1 Festnetz-Internet {charge}€{}.pdf",
        doc.temporal,
        input.components.tag_block_with(&["scan", "bill"])
    );
    Some(NewName::new(new_name).with_charge(&charge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Derivation, FileNameComponents};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn settings() -> HashMap<String, String> {
        [
            (keys::GENERALI_POLICY_NUMBER, "G-998877"),
            (keys::MERKUR_POLICY_NUMBER, "M-123456"),
            (keys::MERKUR_PAYMENT_REFERENCE, "REF4711XYZ"),
            (keys::LOAN_INSTITUTE, "Sparkasse Nord"),
            (keys::LOAN_ID, "DL-2016-0042"),
            (keys::PROVIDER_CONTRACT, "Vertrag 5550123"),
            (keys::PROVIDER_CUE, "Ihre Rechnung fuer Internet"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn derive(name: &str, content: &str, lookup: Option<&dyn Lookup>) -> Option<Derivation> {
        let components = FileNameComponents::parse(name).unwrap();
        let input = RuleInput::new(name, &components)
            .with_content(content)
            .with_lookup(lookup);
        content_rules().first_match(&input)
    }

    fn derive_name(name: &str, content: &str) -> Option<String> {
        let lookup = settings();
        derive(name, content, Some(&lookup as &dyn Lookup)).map(|d| d.new_name)
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            content_rules().names(),
            vec![
                "easybank-tan-list",
                "church-tax",
                "generali-premium",
                "merkur-premium",
                "loan-statement",
                "a1-invoice",
            ]
        );
    }

    #[test]
    fn test_easybank_tan_list() {
        let content = "Ihre neuen Transaktionsnummern (TANs)\nFalls Ihre TAN-Liste in Verlust geraten ist";
        assert_eq!(
            derive_name("2010-06-08 Scan -- private.pdf", content).unwrap(),
            "2010-06-08 easybank - neue TAN-Liste -- private scan.pdf"
        );
    }

    #[test]
    fn test_church_tax_with_charge_from_content() {
        let content = "Konto 4294-0208 IBAN AT086000000007042401 Offen 47,50 Zahlungen bis";
        assert_eq!(
            derive_name("2015-11-20 Scan.pdf", content).unwrap(),
            "2015-11-20 Kirchenbeitrag 47,50€ -- scan taxes bill.pdf"
        );
    }

    #[test]
    fn test_church_tax_without_charge_needs_fix() {
        let lookup = settings();
        let content = "Konto 4294-0208 IBAN AT086000000007042401";
        let derivation =
            derive("2015-11-20 Scan.pdf", content, Some(&lookup as &dyn Lookup)).unwrap();
        assert_eq!(
            derivation.new_name,
            "2015-11-20 Kirchenbeitrag FIXXME€ -- scan taxes bill.pdf"
        );
        assert_eq!(derivation.rule, "church-tax");
        assert!(derivation.needs_fix);
    }

    #[test]
    fn test_church_tax_charge_from_name() {
        let content = "Konto 4294-0208 IBAN AT086000000007042401";
        assert_eq!(
            derive_name("2015-11-20 Kirche 8,00 EUR.pdf", content).unwrap(),
            "2015-11-20 Kirchenbeitrag 8,00€ -- scan taxes bill.pdf"
        );
    }

    #[test]
    fn test_generali_premium() {
        let content = "Polizze G-998877\n\
            ImHinblickaufdievereinbarteDynamikklauseltritteineWertsteigerunginKraft.\n\
            IhreangepasstePrämiebeträgtdahermonatlich\n\
            IndiesemBetragistauchdiegesetzlicheVersicherungssteuerenthalten.EUR 23,45Wird\n\
            Creditor AT44ZZZ00000002054";
        assert_eq!(
            derive_name("2015-11-24 Generali.pdf", content).unwrap(),
            "2015-11-24 Generali Erhoehung Dynamikklausel - Praemie nun 23,45€ - Polizze G-998877 -- scan bill.pdf"
        );
    }

    #[test]
    fn test_generali_requires_exact_policy_number() {
        let content = "ImHinblickaufdievereinbarteDynamikklauseltritteineWertsteigerunginKraft \
            IhreangepasstePrämiebeträgtdahermonatlich AT44ZZZ00000002054";
        assert_eq!(derive_name("2015-11-24 Generali.pdf", content), None);
    }

    #[test]
    fn test_merkur_premium() {
        let content = "Prämienvorschreibung M-123456 Zahlungsreferenz REF4711XYZ EUR 12,34 Gesundheit ist ein kostbares Gut";
        assert_eq!(
            derive_name("2015-11-30 Merkur -- private.pdf", content).unwrap(),
            "2015-11-30 Merkur Lebensversicherung M-123456 - Praemienzahlungsaufforderung 12,34€ -- private scan bill.pdf"
        );
    }

    #[test]
    fn test_loan_statement() {
        let content = "Sparkasse Nord\nKontomitteilung zu Ihrem Darlehen DL-2016-0042";
        assert_eq!(
            derive_name("2016-02-22 Scan.pdf", content).unwrap(),
            "2016-02-22 Sparkasse Nord - Darlehnen - Kontomitteilung -- scan taxes.pdf"
        );
    }

    #[test]
    fn test_a1_invoice() {
        let content = "Vertrag 5550123\nIhre Rechnung fuer Internet\n\u{2022} 39,90 Bei Online Zahlungen geben Sie";
        assert_eq!(
            derive_name("2015-11-24 Scan.pdf", content).unwrap(),
            "2015-11-24 A1 Festnetz-Internet 39,90€ -- scan bill.pdf"
        );
    }

    #[test]
    fn test_requires_temporal_prefix() {
        let content = "Konto 4294-0208 IBAN AT086000000007042401 Offen 47,50 Zahlungen";
        assert_eq!(derive_name("Scan.pdf", content), None);
    }

    #[test]
    fn test_no_op_without_configuration() {
        let content = "Konto 4294-0208 IBAN AT086000000007042401 Offen 47,50 Zahlungen";
        assert!(derive("2015-11-20 Scan.pdf", content, None).is_none());
    }

    #[test]
    fn test_unrelated_content() {
        assert_eq!(derive_name("2015-11-20 Scan.pdf", "Lorem ipsum dolor sit amet"), None);
    }
}
