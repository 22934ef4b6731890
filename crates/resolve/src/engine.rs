//! Run orchestration plus CSV record loading and writing.

use std::collections::HashMap;

use crate::block::block_by_country;
use crate::cluster::{cluster_block, TierCounts};
use crate::config::{InputConfig, ResolveConfig};
use crate::error::ResolveError;
use crate::model::{Record, ResolveMeta, ResolveResult, ResolveSummary};
use crate::normalize::normalize_record;

/// Normalize, block, and cluster a record set.
///
/// Cannot fail: normalization is total and clustering assigns every
/// record exactly one non-negative `group_id`. Group ids come from one
/// dense counter advanced across blocks in block order, so numbering is
/// stable across runs for the same input.
pub fn run(config: &ResolveConfig, mut records: Vec<Record>) -> ResolveResult {
    for record in &mut records {
        normalize_record(record);
    }

    let blocks = block_by_country(&records);

    let mut next_group_id: i64 = 0;
    let mut counts = TierCounts::default();
    for block in &blocks {
        cluster_block(&mut records, &block.rows, &mut next_group_id, &mut counts);
    }

    let mut group_sizes: HashMap<i64, usize> = HashMap::new();
    for record in &records {
        *group_sizes.entry(record.group_id).or_insert(0) += 1;
    }
    let singleton_groups = group_sizes.values().filter(|&&n| n == 1).count();

    ResolveResult {
        meta: ResolveMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary: ResolveSummary {
            total_records: records.len(),
            blocks: blocks.len(),
            groups: next_group_id as usize,
            singleton_groups,
            merged_strong_name: counts.strong_name,
            merged_name_domain: counts.name_domain,
            merged_name_contact: counts.name_contact,
        },
        records,
    }
}

/// Load records from CSV text, applying the config's column mapping.
/// Empty cells become `None`; unmapped columns are ignored.
pub fn load_csv_records(csv_data: &str, input: &InputConfig) -> Result<Vec<Record>, ResolveError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ResolveError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ResolveError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ResolveError::MissingColumn { column: name.into() })
    };

    let col = &input.columns;
    let company_name_idx = idx(&col.company_name)?;
    let website_domain_idx = idx(&col.website_domain)?;
    let primary_phone_idx = idx(&col.primary_phone)?;
    let main_country_code_idx = idx(&col.main_country_code)?;
    let primary_email_idx = idx(&col.primary_email)?;
    let facebook_url_idx = idx(&col.facebook_url)?;

    let field = |row: &csv::StringRecord, i: usize| -> Option<String> {
        match row.get(i) {
            None | Some("") => None,
            Some(value) => Some(value.to_string()),
        }
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ResolveError::Csv(e.to_string()))?;
        records.push(Record {
            company_name: field(&row, company_name_idx),
            website_domain: field(&row, website_domain_idx),
            primary_phone: field(&row, primary_phone_idx),
            main_country_code: field(&row, main_country_code_idx),
            primary_email: field(&row, primary_email_idx),
            facebook_url: field(&row, facebook_url_idx),
            ..Record::default()
        });
    }

    Ok(records)
}

/// Output column order: `group_id` leads, then the persisted normalized
/// fields, then the raw fields.
const OUTPUT_HEADERS: &[&str] = &[
    "group_id",
    "website_domain_normalized",
    "company_name_normalized",
    "country_code_normalized",
    "primary_email_normalized",
    "facebook_url_normalized",
    "company_name",
    "website_domain",
    "primary_phone",
    "main_country_code",
    "primary_email",
    "facebook_url",
];

/// Render the clustered record set as CSV text, `group_id` first.
pub fn write_csv_records(records: &[Record]) -> Result<String, ResolveError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(OUTPUT_HEADERS)
        .map_err(|e| ResolveError::Csv(e.to_string()))?;

    for record in records {
        let group_id = record.group_id.to_string();
        writer
            .write_record([
                group_id.as_str(),
                record.website_domain_normalized.as_str(),
                record.company_name_normalized.as_str(),
                record.country_code_normalized.as_str(),
                record.primary_email_normalized.as_str(),
                record.facebook_url_normalized.as_str(),
                record.company_name.as_deref().unwrap_or(""),
                record.website_domain.as_deref().unwrap_or(""),
                record.primary_phone.as_deref().unwrap_or(""),
                record.main_country_code.as_deref().unwrap_or(""),
                record.primary_email.as_deref().unwrap_or(""),
                record.facebook_url.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ResolveError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ResolveError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ResolveError::Io(e.to_string()))
}
