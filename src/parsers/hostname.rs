use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `<prefix>-20` followed by ten or more digits, as in UAC's
    /// `<host>-YYYYMMDDHHMMSS` output folder names
    static ref UAC_HOST_PATTERN: Regex = Regex::new(r"^(.+?)-20\d{10,}").unwrap();
}

/// Derive a host name from a UAC folder or file name.
///
/// Returns the part before the timestamp suffix, or the name unchanged when
/// it carries no timestamp. The digits are not checked for a real date.
pub fn extract_hostname(name: &str) -> &str {
    UAC_HOST_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |prefix| prefix.as_str())
}
