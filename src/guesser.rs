use crate::config::Lookup;
use crate::error::{GuessError, Result};
use crate::extractor::{PdfExtractor, TextExtractor};
use crate::models::{Derivation, FileNameComponents};
use crate::rules::content::content_rules;
use crate::rules::name::name_rules;
use crate::rules::{RuleInput, RuleRegistry};
use crate::utils::{get_extension, is_document_extension};
use std::path::Path;
use std::sync::Arc;

/// Derives new file names from old names and, for PDF documents, from their
/// text content.
///
/// A derived name identical to the old one counts as no match, so running the
/// guesser over its own output is a no-op.
pub struct FilenameGuesser {
    name_rules: RuleRegistry,
    content_rules: RuleRegistry,
    lookup: Option<Arc<dyn Lookup>>,
    extractor: Arc<dyn TextExtractor>,
}

impl FilenameGuesser {
    /// Guesser with the built-in rule tables and the PDF extractor
    pub fn new(lookup: Option<Arc<dyn Lookup>>) -> Self {
        Self {
            name_rules: name_rules(),
            content_rules: content_rules(),
            lookup,
            extractor: Arc::new(PdfExtractor::new()),
        }
    }

    pub fn with_rules(mut self, name_rules: RuleRegistry, content_rules: RuleRegistry) -> Self {
        self.name_rules = name_rules;
        self.content_rules = content_rules;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn has_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    /// New name derived from the old basename alone
    pub fn derive_from_name(&self, name: &str) -> Result<Option<Derivation>> {
        let components = FileNameComponents::parse(name)?;
        let input = RuleInput::new(name, &components).with_lookup(self.lookup.as_deref());
        Ok(unchanged_is_no_match(name, self.name_rules.first_match(&input)))
    }

    /// New name derived from the text content of a PDF document
    pub fn derive_from_content(
        &self,
        dirname: &Path,
        basename: &str,
        content: &str,
    ) -> Result<Option<Derivation>> {
        let components = FileNameComponents::parse(basename)?;

        let is_document = components
            .extension
            .as_deref()
            .map(is_document_extension)
            .unwrap_or(false);
        if !is_document {
            tracing::debug!(
                "File is not a PDF file and thus can't be parsed: {}",
                dirname.join(basename).display()
            );
            return Ok(None);
        }
        if self.lookup.is_none() {
            tracing::debug!("no configuration loaded, skipping content rules");
            return Ok(None);
        }
        if content.is_empty() {
            tracing::warn!(
                "Could read PDF file content but it is empty (skipping content analysis)"
            );
            return Ok(None);
        }

        let input = RuleInput::new(basename, &components)
            .with_content(content)
            .with_lookup(self.lookup.as_deref());
        Ok(unchanged_is_no_match(basename, self.content_rules.first_match(&input)))
    }

    /// Try the name rules first, then the content rules for supported documents
    pub async fn guess(&self, path: &Path) -> anyhow::Result<Option<Derivation>> {
        let basename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| GuessError::Unparseable(path.display().to_string()))?;

        if let Some(derivation) = self.derive_from_name(basename)? {
            tracing::debug!("derived new filename from old filename: {}", derivation.new_name);
            return Ok(Some(derivation));
        }
        tracing::debug!("could not derive a new filename from {}", basename);

        let extension = get_extension(path).unwrap_or_default();
        if !self.extractor.supports_extension(&extension) {
            tracing::debug!(
                "file extension is not a supported document type, skipping content analysis"
            );
            return Ok(None);
        }
        if self.lookup.is_none() {
            tracing::debug!("no configuration loaded, skipping content analysis");
            return Ok(None);
        }

        let content = match self.extractor.extract(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Could not read PDF file content. Skipping its content: {:#}", e);
                return Ok(None);
            }
        };

        let dirname = path.parent().unwrap_or_else(|| Path::new("."));
        let derivation = self.derive_from_content(dirname, basename, &content)?;
        if let Some(derivation) = &derivation {
            tracing::debug!("derived new filename from content: {}", derivation.new_name);
        }
        Ok(derivation)
    }
}

fn unchanged_is_no_match(old: &str, derivation: Option<Derivation>) -> Option<Derivation> {
    derivation.filter(|d| d.new_name != old)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::keys;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeExtractor {
        text: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeExtractor {
        fn returning(text: &str) -> Arc<Self> {
            Arc::new(Self {
                text: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                text: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl TextExtractor for FakeExtractor {
        async fn extract(&self, _path: &Path) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text
                .clone()
                .ok_or_else(|| anyhow::anyhow!("unreadable document"))
        }

        fn supports_extension(&self, ext: &str) -> bool {
            ext.eq_ignore_ascii_case("pdf")
        }
    }

    fn settings() -> Arc<dyn Lookup> {
        let mut map = HashMap::new();
        map.insert(keys::LOAN_INSTITUTE.to_string(), "Sparkasse Nord".to_string());
        map.insert(keys::LOAN_ID.to_string(), "DL-2016-0042".to_string());
        Arc::new(map)
    }

    fn derive(name: &str) -> Option<String> {
        FilenameGuesser::new(None)
            .derive_from_name(name)
            .unwrap()
            .map(|d| d.new_name)
    }

    #[test]
    fn test_end_to_end_names() {
        assert_eq!(
            derive("2016-03-05 a1 12,34 €.pdf").unwrap(),
            "2016-03-05 A1 Festnetz-Internet 12,34€ -- scan bill.pdf"
        );
        assert_eq!(
            derive("Screenshot_2017-11-29_10-32-12.png").unwrap(),
            "2017-11-29T10.32.12 -- screenshots.png"
        );
        assert_eq!(derive("rec_20171129-0902.mp3").unwrap(), "2017-11-29T09.02.mp3");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(derive("foo bar.txt"), None);
        assert_eq!(derive("2016-03-05 holiday.jpg"), None);
    }

    #[test]
    fn test_empty_name_is_an_error() {
        let result = FilenameGuesser::new(None).derive_from_name("");
        assert!(matches!(result, Err(GuessError::EmptyName)));
    }

    #[test]
    fn test_derivations_are_idempotent() {
        let guesser = FilenameGuesser::new(None);
        let names = [
            "2016-03-05 a1 12,34 €.pdf",
            "Screenshot_2017-11-29_10-32-12.png",
            "Screenshot_2013-03-05-08-14-09 foo bar.png",
            "rec_20171129-0902 A nice recording .wav",
            "C112345678901EUR20150930001.pdf",
            "2017-11-05T10.56.11_IKS-00000000512345678901234567890.csv",
            "20161227T201500 h115421 ORF Das Sacher. In bester Gesellschaft 1.mp4",
            "2015-05-27T09;00;15_foo_bar.gpx",
            "IMG_20161014_214404_Bokeh foo.jpg",
            "VID_20170105_173104.mp4",
            "2016-01-19--2016-02-12 10er.pdf",
            "2016-01-19 bill foobar baz 12,12EUR.pdf",
            "2015-04-30 FH Abrechnungsbeleg 12,34 EUR.pdf",
            "2016-02-26 Gehalt infonova 12,34 EUR.pdf",
            "2012-05-26T22.25.12_IMAG0861 Rage.jpg",
            "2015-03-11 VBV Kontoinformation 123 EUR.pdf",
            "2015-03-11 Verbrauchsablesung Wasser.pdf",
            "2017-08-16-2017-09-23 Hipster.png",
            "2017-12-07_09-23_Thu Went for a walk .gpx",
            "IMG_20161014_214404 bill 12 EUR.jpg",
            "rec_20171129-0902 Gas bill 12 EUR.mp3",
            "Screenshot_2017-11-07_07-52-59 hipster.png",
        ];

        for name in names {
            let first = guesser
                .derive_from_name(name)
                .unwrap()
                .unwrap_or_else(|| panic!("no derivation for {name}"));
            let second = guesser.derive_from_name(&first.new_name).unwrap();
            assert_eq!(second, None, "{} -> {} was derived again", name, first.new_name);
        }
    }

    #[test]
    fn test_device_names_with_keywords_keep_their_normalized_form() {
        assert_eq!(
            derive("IMG_20161014_214404 bill 12 EUR.jpg").unwrap(),
            "2016-10-14T21.44.04 bill 12 EUR.jpg"
        );
        assert_eq!(derive("2016-10-14T21.44.04 bill 12 EUR.jpg"), None);
        assert_eq!(
            derive("Screenshot_2017-11-07_07-52-59 hipster.png").unwrap(),
            "2017-11-07T07.52.59 hipster -- screenshots.png"
        );
        assert_eq!(derive("2017-11-07T07.52.59 hipster -- screenshots.png"), None);
    }

    #[test]
    fn test_derive_from_content_requires_pdf_and_lookup() {
        let content = "Sparkasse Nord Kontomitteilung DL-2016-0042";
        let dir = Path::new("/tmp");

        let without_lookup = FilenameGuesser::new(None);
        let derived = without_lookup.derive_from_content(dir, "2016-02-22 Scan.pdf", content);
        assert_eq!(derived.unwrap(), None);

        let guesser = FilenameGuesser::new(Some(settings()));
        assert_eq!(guesser.derive_from_content(dir, "2016-02-22 Scan.txt", content).unwrap(), None);
        assert_eq!(guesser.derive_from_content(dir, "2016-02-22 Scan.pdf", "").unwrap(), None);
        assert_eq!(
            guesser
                .derive_from_content(dir, "2016-02-22 Scan.PDF", content)
                .unwrap()
                .unwrap()
                .new_name,
            "2016-02-22 Sparkasse Nord - Darlehnen - Kontomitteilung -- scan taxes.pdf"
        );
    }

    #[tokio::test]
    async fn test_guess_prefers_name_rules() {
        let extractor = FakeExtractor::returning("Sparkasse Nord DL-2016-0042");
        let guesser = FilenameGuesser::new(Some(settings())).with_extractor(extractor.clone());

        let derivation = guesser
            .guess(&PathBuf::from("/tmp/2016-03-05 a1 12,34 €.pdf"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(derivation.rule, "a1-bill");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guess_falls_back_to_content() {
        let extractor = FakeExtractor::returning("Sparkasse Nord DL-2016-0042");
        let guesser = FilenameGuesser::new(Some(settings())).with_extractor(extractor.clone());

        let derivation = guesser
            .guess(&PathBuf::from("/tmp/2016-02-22 Scan -- private.pdf"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(derivation.rule, "loan-statement");
        assert_eq!(
            derivation.new_name,
            "2016-02-22 Sparkasse Nord - Darlehnen - Kontomitteilung -- private scan taxes.pdf"
        );
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_guess_skips_content_of_other_documents() {
        let extractor = FakeExtractor::returning("Sparkasse Nord DL-2016-0042");
        let guesser = FilenameGuesser::new(Some(settings())).with_extractor(extractor.clone());

        assert!(guesser.guess(Path::new("/tmp/2016-02-22 Scan.txt")).await.unwrap().is_none());
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guess_skips_content_without_lookup() {
        let extractor = FakeExtractor::returning("Sparkasse Nord DL-2016-0042");
        let guesser = FilenameGuesser::new(None).with_extractor(extractor.clone());

        assert!(guesser.guess(Path::new("/tmp/2016-02-22 Scan.pdf")).await.unwrap().is_none());
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guess_survives_extraction_failure() {
        let guesser =
            FilenameGuesser::new(Some(settings())).with_extractor(FakeExtractor::failing());
        assert!(guesser.guess(Path::new("/tmp/2016-02-22 Scan.pdf")).await.unwrap().is_none());
    }
}
