//! Incremental cluster engine: one pass per country block against an
//! insertion-ordered set of group representatives.

use crate::model::{MatchTier, Record};
use crate::similarity::token_sort_ratio;

/// Name score must exceed this for an unconditional match.
const STRONG_NAME_FLOOR: u8 = 90;
/// Domain-corroborated band: score in `(70, 90]`.
const NAME_DOMAIN_FLOOR: u8 = 70;
/// Contact-corroborated band: score in `(30, 70]`.
const NAME_CONTACT_FLOOR: u8 = 30;

/// The founding record of a group within one block.
///
/// Later records are compared against founders only; a record absorbed
/// into a group never becomes a representative, so a group's match
/// surface does not grow as it fills.
#[derive(Debug, Clone)]
pub struct Representative {
    pub group_id: i64,
    /// Normalized company name.
    pub name: String,
    /// Normalized website domain.
    pub domain: String,
    /// Raw primary phone. Corroboration compares raw values.
    pub phone: String,
    /// Raw Facebook URL. Corroboration compares raw values.
    pub facebook: String,
}

impl Representative {
    fn for_record(record: &Record, group_id: i64) -> Self {
        Self {
            group_id,
            name: record.company_name_normalized.clone(),
            domain: record.website_domain_normalized.clone(),
            phone: record.primary_phone.clone().unwrap_or_default(),
            facebook: record.facebook_url.clone().unwrap_or_default(),
        }
    }
}

/// Per-tier merge counts for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TierCounts {
    pub strong_name: usize,
    pub name_domain: usize,
    pub name_contact: usize,
}

impl TierCounts {
    fn bump(&mut self, tier: MatchTier) {
        match tier {
            MatchTier::StrongName => self.strong_name += 1,
            MatchTier::NameAndDomain => self.name_domain += 1,
            MatchTier::NameAndContact => self.name_contact += 1,
        }
    }
}

/// Assign a group id to every row of one block, in row order.
///
/// `next_group_id` is the caller-owned global counter, shared across
/// blocks; it advances once per newly opened group.
pub fn cluster_block(
    records: &mut [Record],
    rows: &[usize],
    next_group_id: &mut i64,
    counts: &mut TierCounts,
) {
    let mut representatives: Vec<Representative> = Vec::new();

    for &row in rows {
        match find_group(&records[row], &representatives) {
            Some((group_id, tier)) => {
                records[row].group_id = group_id;
                counts.bump(tier);
            }
            None => {
                records[row].group_id = *next_group_id;
                representatives.push(Representative::for_record(&records[row], *next_group_id));
                *next_group_id += 1;
            }
        }
    }
}

/// First representative, oldest first, that the record matches under the
/// tier policy. First match wins: a later representative with a higher
/// score is never considered.
fn find_group(record: &Record, representatives: &[Representative]) -> Option<(i64, MatchTier)> {
    let phone = record.primary_phone.as_deref().unwrap_or("");
    let facebook = record.facebook_url.as_deref().unwrap_or("");

    for rep in representatives {
        let score = token_sort_ratio(&record.company_name_normalized, &rep.name);
        if let Some(tier) = match_tier(
            score,
            &record.website_domain_normalized,
            phone,
            facebook,
            rep,
        ) {
            return Some((rep.group_id, tier));
        }
    }
    None
}

/// Tier policy for one (record, representative) pair. Only the band the
/// score falls in is checked; corroborating fields must be non-empty on
/// both sides, so an absent field fails every corroboration check.
fn match_tier(
    score: u8,
    domain: &str,
    phone: &str,
    facebook: &str,
    rep: &Representative,
) -> Option<MatchTier> {
    if score > STRONG_NAME_FLOOR {
        return Some(MatchTier::StrongName);
    }
    if score > NAME_DOMAIN_FLOOR {
        return (!domain.is_empty() && domain == rep.domain).then_some(MatchTier::NameAndDomain);
    }
    if score > NAME_CONTACT_FLOOR {
        let phone_hit = !phone.is_empty() && phone == rep.phone;
        let facebook_hit = !facebook.is_empty() && facebook == rep.facebook;
        return (phone_hit || facebook_hit).then_some(MatchTier::NameAndContact);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(name: &str, domain: &str, phone: &str, facebook: &str) -> Representative {
        Representative {
            group_id: 0,
            name: name.into(),
            domain: domain.into(),
            phone: phone.into(),
            facebook: facebook.into(),
        }
    }

    fn record(name: &str, domain: &str, phone: &str, facebook: &str) -> Record {
        Record {
            primary_phone: (!phone.is_empty()).then(|| phone.to_string()),
            facebook_url: (!facebook.is_empty()).then(|| facebook.to_string()),
            company_name_normalized: name.into(),
            website_domain_normalized: domain.into(),
            ..Record::default()
        }
    }

    // -- tier boundaries ------------------------------------------------

    #[test]
    fn score_91_matches_on_name_alone() {
        let r = rep("x", "", "", "");
        assert_eq!(
            match_tier(91, "other", "", "", &r),
            Some(MatchTier::StrongName)
        );
    }

    #[test]
    fn score_90_is_not_unconditional() {
        let r = rep("x", "acme.com", "", "");
        assert_eq!(match_tier(90, "", "", "", &r), None);
        // ...but an equal non-empty domain carries it
        assert_eq!(
            match_tier(90, "acme.com", "", "", &r),
            Some(MatchTier::NameAndDomain)
        );
    }

    #[test]
    fn score_70_is_not_a_domain_tier_score() {
        let r = rep("x", "acme.com", "", "");
        // 70 falls into the contact band; equal domains don't help there
        assert_eq!(match_tier(70, "acme.com", "", "", &r), None);
    }

    #[test]
    fn contact_band_needs_equal_phone_or_facebook() {
        let r = rep("x", "", "123", "facebook.com/acme");
        assert_eq!(
            match_tier(50, "", "123", "", &r),
            Some(MatchTier::NameAndContact)
        );
        assert_eq!(
            match_tier(50, "", "", "facebook.com/acme", &r),
            Some(MatchTier::NameAndContact)
        );
        assert_eq!(match_tier(50, "", "999", "", &r), None);
    }

    #[test]
    fn score_30_never_matches() {
        let r = rep("x", "", "123", "");
        assert_eq!(match_tier(30, "", "123", "", &r), None);
    }

    #[test]
    fn empty_corroboration_never_matches() {
        let r = rep("x", "", "", "");
        // Both sides empty: "equal" but absent, so no merge
        assert_eq!(match_tier(50, "", "", "", &r), None);
        assert_eq!(match_tier(80, "", "", "", &r), None);
    }

    // -- block behavior -------------------------------------------------

    fn run_block(records: &mut Vec<Record>) -> (i64, TierCounts) {
        let rows: Vec<usize> = (0..records.len()).collect();
        let mut next = 0;
        let mut counts = TierCounts::default();
        cluster_block(records, &rows, &mut next, &mut counts);
        (next, counts)
    }

    #[test]
    fn identical_names_share_a_group() {
        let mut records = vec![
            record("microsoft", "", "", ""),
            record("microsoft", "", "", ""),
        ];
        let (next, counts) = run_block(&mut records);

        assert_eq!(records[0].group_id, 0);
        assert_eq!(records[1].group_id, 0);
        assert_eq!(next, 1);
        assert_eq!(counts.strong_name, 1);
    }

    #[test]
    fn matched_records_never_become_representatives() {
        // r1 scores 95 against r0 and joins its group. r2 scores 89
        // against r0 but 94 against r1; since r1 is not a representative
        // and r2 has no domain to corroborate, r2 opens its own group.
        let mut records = vec![
            record("blue widget company", "", "", ""),
            record("blue widget compan", "", "", ""),
            record("blue widget compa", "", "", ""),
        ];
        let (next, _) = run_block(&mut records);

        assert_eq!(records[0].group_id, 0);
        assert_eq!(records[1].group_id, 0);
        assert_eq!(records[2].group_id, 1);
        assert_eq!(next, 2);
    }

    #[test]
    fn first_match_wins_via_founding_representative() {
        // Same shape, but r2 shares r0's domain: the 89-score domain tier
        // against the founder r0 lands it in group 0 even though r1
        // would have scored higher.
        let mut records = vec![
            record("blue widget company", "bluewidget", "", ""),
            record("blue widget compan", "", "", ""),
            record("blue widget compa", "bluewidget", "", ""),
        ];
        let (next, counts) = run_block(&mut records);

        assert_eq!(records[2].group_id, 0);
        assert_eq!(next, 1);
        assert_eq!(counts.strong_name, 1);
        assert_eq!(counts.name_domain, 1);
    }

    #[test]
    fn contact_corroboration_compares_raw_phone() {
        // "acme group" vs "acme sales" scores 50: contact band
        let mut records = vec![
            record("acme group", "", "+1 (415) 555-0100", ""),
            record("acme sales", "", "+1 (415) 555-0100", ""),
        ];
        let (next, counts) = run_block(&mut records);

        assert_eq!(records[1].group_id, 0);
        assert_eq!(next, 1);
        assert_eq!(counts.name_contact, 1);
    }

    #[test]
    fn mid_score_without_corroboration_opens_a_group() {
        let mut records = vec![
            record("acme group", "", "", ""),
            record("acme sales", "", "", ""),
        ];
        let (next, _) = run_block(&mut records);

        assert_eq!(records[0].group_id, 0);
        assert_eq!(records[1].group_id, 1);
        assert_eq!(next, 2);
    }

    #[test]
    fn facebook_corroboration_compares_raw_url() {
        let url = "https://www.facebook.com/AcmePage";
        let mut records = vec![
            record("acme group", "", "", url),
            record("acme sales", "", "", url),
        ];
        let (next, counts) = run_block(&mut records);

        assert_eq!(records[1].group_id, 0);
        assert_eq!(next, 1);
        assert_eq!(counts.name_contact, 1);
    }
}
