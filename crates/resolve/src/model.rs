use serde::Serialize;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Sentinel `group_id` of a record that clustering has not reached yet.
pub const GROUP_UNASSIGNED: i64 = -1;

/// One business-entity observation: the raw attributes as loaded, plus
/// the canonical forms computed once by the normalizers.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub company_name: Option<String>,
    pub website_domain: Option<String>,
    pub primary_phone: Option<String>,
    pub main_country_code: Option<String>,
    pub primary_email: Option<String>,
    pub facebook_url: Option<String>,

    pub website_domain_normalized: String,
    pub company_name_normalized: String,
    pub country_code_normalized: String,
    pub primary_phone_normalized: String,
    pub primary_email_normalized: String,
    pub facebook_url_normalized: String,

    pub group_id: i64,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            company_name: None,
            website_domain: None,
            primary_phone: None,
            main_country_code: None,
            primary_email: None,
            facebook_url: None,
            website_domain_normalized: String::new(),
            company_name_normalized: String::new(),
            country_code_normalized: String::new(),
            primary_phone_normalized: String::new(),
            primary_email_normalized: String::new(),
            facebook_url_normalized: String::new(),
            group_id: GROUP_UNASSIGNED,
        }
    }
}

// ---------------------------------------------------------------------------
// Blocking
// ---------------------------------------------------------------------------

/// One country's slice of the input. `rows` index into the full record
/// set, in input order.
#[derive(Debug, Clone)]
pub struct CountryBlock {
    pub country: String,
    pub rows: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Clustering
// ---------------------------------------------------------------------------

/// Which rule band merged a record into an existing group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Name similarity alone was decisive (score > 90).
    StrongName,
    /// Mid-band name score backed by an equal non-empty domain.
    NameAndDomain,
    /// Low-band name score backed by an equal phone or Facebook URL.
    NameAndContact,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongName => write!(f, "strong_name"),
            Self::NameAndDomain => write!(f, "name_and_domain"),
            Self::NameAndContact => write!(f, "name_and_contact"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ResolveSummary {
    pub total_records: usize,
    pub blocks: usize,
    pub groups: usize,
    pub singleton_groups: usize,
    pub merged_strong_name: usize,
    pub merged_name_domain: usize,
    pub merged_name_contact: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Full outcome of one run. `records` carry their assigned `group_id`;
/// the report serialization covers meta and summary only, the record set
/// itself is persisted as CSV.
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub meta: ResolveMeta,
    pub summary: ResolveSummary,
    #[serde(skip)]
    pub records: Vec<Record>,
}
