//! Field normalizers: one raw attribute in, one canonical form out.
//!
//! Every function here is total. Missing or unparseable input maps to the
//! empty string (or the `"unknown"` country sentinel), never to an error.
//! Canonical forms are fixed points: normalizing an already-normalized
//! value is a no-op.

use crate::model::Record;

/// Country sentinel when neither the explicit field nor the phone number
/// yields a region.
pub const UNKNOWN_COUNTRY: &str = "unknown";

/// Canonical company names are cut at this length.
const MAX_NAME_LEN: usize = 50;

/// Legal-entity suffixes dropped from company names, matched as whole
/// tokens anywhere in the string, case-insensitive, with or without
/// interleaving periods ("Ltd", "L.T.D.", "ltd.,").
const LEGAL_SUFFIXES: &[&str] = &[
    "SRL", "LLC", "PVT", "INC", "SA", "SC", "GMBH", "LTD", "LIMITED", "CORP", "CORPORATION",
    "PLC", "NV", "AG", "OY", "AB", "BV", "AS", "SAS", "SPA", "KK", "LLP", "CO", "ORG",
];

/// Compute every derived field on a record. Called once per record before
/// blocking; derived fields are not touched again.
pub fn normalize_record(record: &mut Record) {
    record.website_domain_normalized = normalize_domain(record.website_domain.as_deref());
    record.company_name_normalized = normalize_company_name(record.company_name.as_deref());
    record.country_code_normalized = normalize_country_code(
        record.main_country_code.as_deref(),
        record.primary_phone.as_deref(),
    );
    record.primary_phone_normalized = normalize_phone(record.primary_phone.as_deref());
    record.primary_email_normalized = normalize_email(record.primary_email.as_deref());
    record.facebook_url_normalized = normalize_facebook_url(record.facebook_url.as_deref());
}

/// Registrable-domain label of a raw URL or host string, lowercase.
/// `https://www.example.co.uk/about` becomes `example`. Empty when the
/// input is missing or has no parseable host.
pub fn normalize_domain(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let Some(host) = extract_host(raw) else {
        return String::new();
    };
    match psl::domain_str(&host) {
        Some(domain) => domain.split('.').next().unwrap_or("").to_string(),
        // No recognized public suffix (bare label, intranet name): the
        // last label stands in as the domain.
        None => host.rsplit('.').next().unwrap_or("").to_string(),
    }
}

fn extract_host(raw: &str) -> Option<String> {
    let parsed = if raw.contains("://") {
        url::Url::parse(raw)
    } else {
        url::Url::parse(&format!("http://{raw}"))
    };
    parsed.ok()?.host_str().map(|h| h.to_ascii_lowercase())
}

/// Canonical company name: legal-suffix-stripped, alphanumeric-only,
/// lowercase, whitespace-collapsed, cut to 50 characters.
pub fn normalize_company_name(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    // Everything after the first '|' is a secondary label; drop it.
    let base = raw.split('|').next().unwrap_or("");

    let mut kept = String::new();
    for token in base.split_whitespace() {
        if is_legal_suffix(token) {
            continue;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(token);
    }

    let cleaned: String = kept
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .take(MAX_NAME_LEN)
        .collect()
}

fn is_legal_suffix(token: &str) -> bool {
    let bare: String = token.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    !bare.is_empty() && LEGAL_SUFFIXES.iter().any(|s| bare.eq_ignore_ascii_case(s))
}

/// Uppercase country code from the explicit field, else inferred from
/// the phone number, else [`UNKNOWN_COUNTRY`]. The explicit field is
/// trusted as-is; there is no validation against an ISO list.
pub fn normalize_country_code(country: Option<&str>, phone: Option<&str>) -> String {
    if let Some(country) = country {
        let trimmed = country.trim();
        if !trimmed.is_empty() {
            return trimmed.to_uppercase();
        }
    }
    region_for_phone(phone.unwrap_or("")).unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())
}

/// Region inference collaborator: ISO region of an international-format
/// phone number, `None` when the number cannot be parsed or carries no
/// region information.
pub fn region_for_phone(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let number = phonenumber::parse(None, raw).ok()?;
    number.country().id().map(|id| id.as_ref().to_string())
}

/// Digits-only phone form. No validation: a malformed number collapses
/// to whatever digits remain, possibly none.
pub fn normalize_phone(raw: Option<&str>) -> String {
    raw.unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Lowercased email restricted to `[a-z0-9@._-]`. Gmail ignores dots in
/// the local part, so for addresses at exactly `gmail.com` the dots are
/// collapsed and dotted and undotted spellings compare equal.
pub fn normalize_email(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    let canonical = match lowered.split_once('@') {
        Some((local, domain)) if domain == "gmail.com" => {
            format!("{}@{domain}", local.replace('.', ""))
        }
        _ => lowered,
    };

    canonical
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '@' | '.' | '_' | '-'))
        .collect()
}

/// Lowercase handle segment of a Facebook profile/page URL: scheme,
/// `www.`/`m.` prefixes, query and fragment stripped. Empty when the
/// input does not mention `facebook.com`, has no path segment after the
/// host, or names a numeric profile (`profile.php`). An empty handle is
/// never a match key downstream.
pub fn normalize_facebook_url(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    if !raw.contains("facebook.com") {
        return String::new();
    }

    let mut s = raw.trim().to_lowercase();
    if let Some(pos) = s.find('?') {
        s.truncate(pos);
    }
    if let Some(pos) = s.find('#') {
        s.truncate(pos);
    }

    let s = s
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let s = s.strip_prefix("www.").unwrap_or(s);
    let s = s.strip_prefix("m.").unwrap_or(s);

    let Some((_, rest)) = s.split_once("facebook.com/") else {
        return String::new();
    };
    let handle = rest.trim_matches('/');
    if handle.is_empty() || handle.starts_with("profile.php") {
        return String::new();
    }
    handle.to_string()
}
