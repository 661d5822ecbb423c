/// Constants used throughout guessfs
/// This module centralizes the naming convention and lookup keys

/// Separates the descriptive part of a name from its tag block
pub const FILENAME_TAG_SEPARATOR: &str = " -- ";

/// Separates tags from each other inside the tag block
pub const BETWEEN_TAG_SEPARATOR: &str = " ";

/// Inserted instead of a charge that could not be extracted
pub const CHARGE_PLACEHOLDER: &str = "FIXXME";

/// Returned by the template expander when called without a match
pub const TEMPLATE_ERROR_MARKER: &str = "ERROR";

/// Minimum partial ratio (exclusive) for a fuzzy containment hit
pub const FUZZY_THRESHOLD: u8 = 64;

/// Characters of non-digit slack allowed around a charge between two anchors
pub const CHARGE_CONTEXT_RANGE: usize = 5;

/// Default directory (next to the file) receiving successfully renamed files
pub const DEFAULT_SUCCESS_DIR: &str = "guess-filename_success";

/// Default directory (next to the file) receiving files without a new name
pub const DEFAULT_ERROR_DIR: &str = "guess-filename_fails";

/// File extensions whose content can be analyzed
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// German month names as used in salary slips; index 0 wraps to December
pub const MONTH_NAMES: &[&str] = &[
    "Dezember",
    "Jaenner",
    "Februar",
    "Maerz",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Keys looked up in the `[lookup]` table of the configuration
pub mod keys {
    pub const SALARY_STARTSTRING: &str = "salary_startstring";
    pub const SALARY_DESCRIPTION: &str = "salary_description";
    pub const SALARY_PDF_PASSWORD: &str = "salary_pdf_password";
    pub const GENERALI_POLICY_NUMBER: &str = "generali_policy_number";
    pub const MERKUR_POLICY_NUMBER: &str = "merkur_policy_number";
    pub const MERKUR_PAYMENT_REFERENCE: &str = "merkur_payment_reference";
    pub const LOAN_INSTITUTE: &str = "loan_institute";
    pub const LOAN_ID: &str = "loan_id";
    pub const PROVIDER_CONTRACT: &str = "provider_contract";
    pub const PROVIDER_CUE: &str = "provider_cue";
}
