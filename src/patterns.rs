//! Regex building blocks shared by the parser and the rule tables.

/// A day, dashes between the fields optional: `2017-11-29` or `20171129`
pub const DAY: &str = r"[12]\d{3}-?[01]\d-?[0123]\d";

/// Time of day as used in normalized names: `T10.32` or `T10.32.12`
pub const TIME: &str = r"T[012]\d.[012345]\d(?:.[012345]\d)?";

/// Delimiters accepted between the fields of a device timestamp
pub const TIMESTAMP_DELIMITERS: &str = "[.;:-]?";

/// Day with optional time of day
pub fn daytime() -> String {
    format!("{DAY}(?:{TIME})?")
}

/// Daytime optionally joined to a second daytime by `-` or `--`
pub fn daytime_duration() -> String {
    let daytime = daytime();
    format!("{daytime}(?:--?{daytime})?")
}

/// Date with named `year`, `month`, `day` groups
pub fn datestamp() -> String {
    format!(
        r"(?P<year>[12]\d{{3}}){d}(?P<month>[01]\d){d}(?P<day>[0123]\d)",
        d = TIMESTAMP_DELIMITERS
    )
}

/// Time with named `hour`, `minute` and optional `second` groups
pub fn timestamp() -> String {
    format!(
        r"(?P<hour>[012]\d){d}(?P<minute>[012345]\d)(?:{d}(?P<second>[012345]\d))?",
        d = TIMESTAMP_DELIMITERS
    )
}

/// Less strict time with named groups, any of `-._:` as optional delimiter
pub fn fuzzy_timestamp() -> String {
    r"(?P<hour>[012]\d)[-._:]?(?P<minute>[012345]\d)(?:[-._:]?(?P<second>[012345]\d))?".to_string()
}
