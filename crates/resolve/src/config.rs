use serde::Deserialize;

use crate::error::ResolveError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run config: where the records live and which CSV columns hold which
/// attribute. File plumbing only; match thresholds are engine constants.
#[derive(Debug, Deserialize)]
pub struct ResolveConfig {
    pub name: String,
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl ResolveConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, ResolveError> {
        let config: ResolveConfig =
            toml::from_str(toml_str).map_err(|e| ResolveError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ResolveError> {
        if self.input.file == self.output.file {
            return Err(ResolveError::ConfigValidation(
                "output.file must differ from input.file".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub file: String,
    #[serde(default)]
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub file: String,
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names of the six raw attributes in the input CSV. Defaults
/// match the canonical export; override per source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub company_name: String,
    pub website_domain: String,
    pub primary_phone: String,
    pub main_country_code: String,
    pub primary_email: String,
    pub facebook_url: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            company_name: "company_name".into(),
            website_domain: "website_domain".into(),
            primary_phone: "primary_phone".into(),
            main_country_code: "main_country_code".into(),
            primary_email: "primary_email".into(),
            facebook_url: "facebook_url".into(),
        }
    }
}
