use std::sync::OnceLock;

use crate::models::{ECLevel, Version};

/// One error-correction block: its data and parity codeword counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub data_words: usize,
    pub ec_words: usize,
}

/// Ordered blocks of a (version, level) pair, short blocks first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    blocks: Vec<BlockSpec>,
}

impl BlockLayout {
    pub fn blocks(&self) -> &[BlockSpec] {
        &self.blocks
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn total_data_words(&self) -> usize {
        self.blocks.iter().map(|b| b.data_words).sum()
    }

    pub fn total_ec_words(&self) -> usize {
        self.blocks.iter().map(|b| b.ec_words).sum()
    }

    pub fn total_codewords(&self) -> usize {
        self.total_data_words() + self.total_ec_words()
    }

    /// Longest data block; drives the interleaving column count
    pub fn max_data_words(&self) -> usize {
        self.blocks.iter().map(|b| b.data_words).max().unwrap_or(0)
    }

    pub fn ec_words_per_block(&self) -> usize {
        self.blocks.first().map_or(0, |b| b.ec_words)
    }
}

// Tables from the QR Code specification (Model 2).
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Modules left for data and parity once every function pattern is placed
pub fn raw_data_modules(version: Version) -> usize {
    raw_modules(version.number() as usize)
}

fn raw_modules(v: usize) -> usize {
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Leftover modules after the last full codeword
pub fn remainder_bits(version: Version) -> usize {
    raw_data_modules(version) % 8
}

fn build_layout(version: u8, level: ECLevel) -> BlockLayout {
    let v = version as usize;
    let idx = level.ordinal();
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize;
    let ec_words = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
    let total = raw_modules(v) / 8;

    let num_long = total % num_blocks;
    let short_data = total / num_blocks - ec_words;
    let blocks = (0..num_blocks)
        .map(|i| BlockSpec {
            data_words: if i < num_blocks - num_long {
                short_data
            } else {
                short_data + 1
            },
            ec_words,
        })
        .collect();
    BlockLayout { blocks }
}

/// Capacity table for every (level, version) pair, built once
pub struct CapacityTable {
    layouts: Vec<[BlockLayout; 4]>,
}

impl CapacityTable {
    fn build() -> Self {
        let layouts = (1..=40u8)
            .map(|v| ECLevel::ALL.map(|level| build_layout(v, level)))
            .collect();
        Self { layouts }
    }

    pub fn layout(&self, version: Version, level: ECLevel) -> &BlockLayout {
        &self.layouts[version.number() as usize - 1][level.ordinal()]
    }

    pub fn total_data_words(&self, version: Version, level: ECLevel) -> usize {
        self.layout(version, level).total_data_words()
    }

    pub fn total_ec_words(&self, version: Version, level: ECLevel) -> usize {
        self.layout(version, level).total_ec_words()
    }

    pub fn total_codewords(&self, version: Version, level: ECLevel) -> usize {
        self.layout(version, level).total_codewords()
    }

    /// First version at or after `start` whose data capacity strictly
    /// exceeds `data_words`; `None` stands for the "nothing fits" sentinel
    pub fn minimal_version_from(
        &self,
        level: ECLevel,
        data_words: usize,
        start: Version,
    ) -> Option<Version> {
        Version::all()
            .skip(start.number() as usize - 1)
            .find(|&v| self.total_data_words(v, level) > data_words)
    }

    pub fn minimal_version(&self, level: ECLevel, data_words: usize) -> Option<Version> {
        self.minimal_version_from(level, data_words, Version::MIN)
    }
}

static CAPACITY_TABLE: OnceLock<CapacityTable> = OnceLock::new();

/// Shared, read-only capacity table
pub fn capacity_table() -> &'static CapacityTable {
    CAPACITY_TABLE.get_or_init(CapacityTable::build)
}

/// Block layout for a version and level
pub fn block_layout(version: Version, level: ECLevel) -> &'static BlockLayout {
    capacity_table().layout(version, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_known_capacities() {
        let table = capacity_table();
        assert_eq!(table.total_data_words(v(1), ECLevel::M), 16);
        assert_eq!(table.total_data_words(v(1), ECLevel::L), 19);
        assert_eq!(table.total_data_words(v(1), ECLevel::H), 9);
        assert_eq!(table.total_data_words(v(40), ECLevel::L), 2956);
        assert_eq!(table.total_codewords(v(1), ECLevel::Q), 26);
        assert_eq!(table.total_codewords(v(40), ECLevel::H), 3706);
    }

    #[test]
    fn test_split_blocks() {
        // 5-Q: 2 blocks of 15 + 2 blocks of 16 data words, 18 EC each
        let layout = block_layout(v(5), ECLevel::Q);
        let data: Vec<usize> = layout.blocks().iter().map(|b| b.data_words).collect();
        assert_eq!(data, vec![15, 15, 16, 16]);
        assert!(layout.blocks().iter().all(|b| b.ec_words == 18));
        assert_eq!(layout.max_data_words(), 16);
    }

    #[test]
    fn test_layout_invariants() {
        let table = capacity_table();
        for version in Version::all() {
            let total = raw_data_modules(version) / 8;
            for level in ECLevel::ALL {
                let layout = table.layout(version, level);
                assert_eq!(layout.total_codewords(), total);
                let min = layout.blocks().iter().map(|b| b.data_words).min().unwrap();
                assert!(layout.max_data_words() - min <= 1);
                let ec = layout.ec_words_per_block();
                assert!(layout.blocks().iter().all(|b| b.ec_words == ec));
            }
        }
    }

    #[test]
    fn test_capacity_decreases_with_level() {
        let table = capacity_table();
        for version in Version::all() {
            let caps: Vec<usize> = ECLevel::ALL
                .iter()
                .map(|&l| table.total_data_words(version, l))
                .collect();
            assert!(caps.windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn test_minimal_version() {
        let table = capacity_table();
        assert_eq!(table.minimal_version(ECLevel::M, 6), Some(v(1)));
        // Strictly greater: 16 words do not fit 1-M
        assert_eq!(table.minimal_version(ECLevel::M, 16), Some(v(2)));
        assert_eq!(table.minimal_version(ECLevel::L, 2956), None);
        assert_eq!(
            table.minimal_version_from(ECLevel::M, 6, v(5)),
            Some(v(5))
        );
    }

    #[test]
    fn test_minimal_version_monotonic() {
        let table = capacity_table();
        for level in ECLevel::ALL {
            let mut last = 0u8;
            for words in 0..3000 {
                let Some(version) = table.minimal_version(level, words) else {
                    break;
                };
                assert!(version.number() >= last);
                assert!(table.total_data_words(version, level) > words);
                last = version.number();
            }
        }
    }

    #[test]
    fn test_remainder_bits() {
        assert_eq!(remainder_bits(v(1)), 0);
        assert_eq!(remainder_bits(v(2)), 7);
        assert_eq!(remainder_bits(v(14)), 3);
        assert_eq!(remainder_bits(v(21)), 4);
    }
}
