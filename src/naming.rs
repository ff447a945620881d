//! Entry and archive naming
//!
//! Archive entries are named from descriptor fields, never from the remote
//! file name, so every file in an export can be traced back to its owner:
//!
//! ```text
//! {identifier}_{display name}[_{category}].{extension}
//! ```

use crate::error::{Error, Result};
use crate::types::DocumentDescriptor;
use chrono::NaiveDate;

/// Keep only ASCII alphanumerics
///
/// # Examples
///
/// ```
/// use placement_archiver::naming::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("TY-IT/001"), "TYIT001");
/// ```
#[must_use]
pub fn sanitize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Keep ASCII alphanumerics and whitespace, then trim
///
/// Any kept whitespace (tabs, newlines, Unicode spaces) becomes a plain space.
///
/// # Examples
///
/// ```
/// use placement_archiver::naming::sanitize_display_name;
///
/// assert_eq!(sanitize_display_name(" John Doe!! "), "John Doe");
/// ```
#[must_use]
pub fn sanitize_display_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c),
            c if c.is_whitespace() => Some(' '),
            _ => None,
        })
        .collect();
    kept.trim().to_string()
}

/// Keep ASCII alphanumerics, `_`, `-` and spaces, then trim
///
/// Categories such as `offer_letter` keep their underscores; path separators
/// and dots never reach the archive.
#[must_use]
pub fn sanitize_category(category: &str) -> String {
    let kept: String = category
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();
    kept.trim().to_string()
}

/// Extension of the last path segment of `url`, lowercased
///
/// Query strings and fragments are ignored. Returns `default` when the URL
/// does not parse or its last segment has no plain alphanumeric extension.
///
/// # Examples
///
/// ```
/// use placement_archiver::naming::extension_from_url;
///
/// assert_eq!(extension_from_url("https://cdn.example.com/a/Offer.PDF?token=1", "pdf"), "pdf");
/// assert_eq!(extension_from_url("https://cdn.example.com/a/report.docx", "pdf"), "docx");
/// assert_eq!(extension_from_url("https://cdn.example.com/a/report", "pdf"), "pdf");
/// assert_eq!(extension_from_url("not a url", "pdf"), "pdf");
/// ```
#[must_use]
pub fn extension_from_url(url: &str, default: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return default.to_string();
    };

    if let Some(mut segments) = parsed.path_segments()
        && let Some(last_segment) = segments.next_back()
        && let Some((stem, ext)) = last_segment.rsplit_once('.')
        && !stem.is_empty()
        && !ext.is_empty()
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return ext.to_ascii_lowercase();
    }

    default.to_string()
}

/// Name a fetched document inside the archive
///
/// Deterministic: the same descriptor always yields the same name. Two
/// descriptors with the same identifier, name and category collapse to one
/// entry name.
///
/// # Examples
///
/// ```
/// use placement_archiver::{DocumentDescriptor, naming::entry_name};
///
/// let descriptor = DocumentDescriptor::new(
///     "https://files.example.com/offers/8f2c.pdf",
///     "John Doe!!",
///     "TYIT001",
/// )
/// .with_category("offer_letter");
///
/// assert_eq!(entry_name(&descriptor, "pdf"), "TYIT001_John Doe_offer_letter.pdf");
/// ```
#[must_use]
pub fn entry_name(descriptor: &DocumentDescriptor, default_extension: &str) -> String {
    let identifier = sanitize_identifier(&descriptor.owner_identifier);
    let name = sanitize_display_name(&descriptor.owner_display_name);
    let extension = extension_from_url(&descriptor.source_location, default_extension);

    let category = descriptor
        .category
        .as_deref()
        .map(sanitize_category)
        .filter(|c| !c.is_empty());

    match category {
        Some(category) => format!("{identifier}_{name}_{category}.{extension}"),
        None => format!("{identifier}_{name}.{extension}"),
    }
}

/// Archive name for a placement drive's offer letters
///
/// Every non-alphanumeric character of the company name becomes `_`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use placement_archiver::naming::offer_letters_archive_name;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(
///     offer_letters_archive_name("Tata Consultancy (TCS)", date),
///     "Tata_Consultancy__TCS__Offer_Letters_2026-10-19.zip"
/// );
/// ```
#[must_use]
pub fn offer_letters_archive_name(company_name: &str, date: NaiveDate) -> String {
    let company: String = company_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{company}_Offer_Letters_{}.zip", date.format("%Y-%m-%d"))
}

/// Archive name for one class's internship submissions of a given type
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use placement_archiver::naming::class_documents_archive_name;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(
///     class_documents_archive_name("TYIT", "completion_letter", date),
///     "TYIT_completion_letter_2026-10-19.zip"
/// );
/// ```
#[must_use]
pub fn class_documents_archive_name(
    class_id: &str,
    assignment_type: &str,
    date: NaiveDate,
) -> String {
    format!(
        "{}_{}_{}.zip",
        sanitize_identifier(class_id),
        sanitize_category(assignment_type),
        date.format("%Y-%m-%d")
    )
}

/// Reject archive names that cannot be used as a plain file name
pub fn validate_archive_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name == "." || name == ".." {
        Some("name is a relative directory reference")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidArchiveName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
