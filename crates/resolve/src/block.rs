//! Country blocking: disjoint partition of the record set keyed by
//! normalized country code.

use std::collections::HashMap;

use crate::model::{CountryBlock, Record};

/// Partition records by `country_code_normalized`. The `"unknown"`
/// sentinel forms a block like any other value.
///
/// Blocks are ordered by first appearance of their country in the input,
/// and rows within a block keep input order. Within-block order is
/// load-bearing: the first record of each cluster becomes the block's
/// comparison anchor.
pub fn block_by_country(records: &[Record]) -> Vec<CountryBlock> {
    let mut blocks: Vec<CountryBlock> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let country = record.country_code_normalized.as_str();
        match index.get(country) {
            Some(&i) => blocks[i].rows.push(row),
            None => {
                index.insert(country.to_string(), blocks.len());
                blocks.push(CountryBlock {
                    country: country.to_string(),
                    rows: vec![row],
                });
            }
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_in(country: &str) -> Record {
        Record {
            country_code_normalized: country.into(),
            ..Record::default()
        }
    }

    #[test]
    fn blocks_partition_the_input() {
        let records = vec![
            record_in("US"),
            record_in("DE"),
            record_in("US"),
            record_in("unknown"),
            record_in("DE"),
        ];

        let blocks = block_by_country(&records);

        let mut covered: Vec<usize> = blocks.iter().flat_map(|b| b.rows.clone()).collect();
        covered.sort_unstable();
        assert_eq!(covered, vec![0, 1, 2, 3, 4]);

        for block in &blocks {
            for &row in &block.rows {
                assert_eq!(records[row].country_code_normalized, block.country);
            }
        }
    }

    #[test]
    fn blocks_keep_first_seen_order() {
        let records = vec![record_in("US"), record_in("DE"), record_in("US")];
        let blocks = block_by_country(&records);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].country, "US");
        assert_eq!(blocks[0].rows, vec![0, 2]);
        assert_eq!(blocks[1].country, "DE");
    }

    #[test]
    fn unknown_is_its_own_block() {
        let records = vec![record_in("unknown"), record_in("US")];
        let blocks = block_by_country(&records);

        assert_eq!(blocks[0].country, "unknown");
        assert_eq!(blocks[0].rows, vec![0]);
    }
}
