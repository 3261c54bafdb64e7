use crate::error::Result;
use crate::models::Version;
use crate::modes::Segment;
use crate::symbol::bit_buffer::BitBuffer;
use crate::symbol::reed_solomon::ReedSolomonEncoder;
use crate::symbol::tables::BlockLayout;

/// Pad bytes alternate between these two values
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Bits the segments occupy at `version`, before terminator and padding
pub fn segments_bit_len(segments: &[Segment], version: Version) -> usize {
    segments.iter().map(|s| s.bit_len(version)).sum()
}

/// Pack `segments` into exactly `capacity_words` data codewords:
/// headers and payloads, up to four terminator bits, zero fill to the
/// byte boundary, then alternating pad bytes
pub fn pack_segments(
    segments: &[Segment],
    version: Version,
    capacity_words: usize,
) -> Result<Vec<u8>> {
    let mut buf = BitBuffer::with_capacity(capacity_words);
    for segment in segments {
        segment.write(version, &mut buf)?;
    }

    let capacity_bits = capacity_words * 8;
    let terminator = capacity_bits.saturating_sub(buf.bit_len()).min(4);
    buf.add_bits(0, terminator)?;
    buf.flush();

    for &pad in PAD_BYTES.iter().cycle() {
        if buf.byte_len() >= capacity_words {
            break;
        }
        buf.write_byte(pad);
    }

    Ok(buf.into_bytes())
}

/// Split data into blocks, append Reed-Solomon parity to each and
/// interleave: data column by column across blocks, then parity likewise
pub fn interleave(data: &[u8], layout: &BlockLayout) -> Vec<u8> {
    let rs = ReedSolomonEncoder::new(layout.ec_words_per_block());
    let mut offset = 0;
    let blocks: Vec<(&[u8], Vec<u8>)> = layout
        .blocks()
        .iter()
        .map(|spec| {
            let end = (offset + spec.data_words).min(data.len());
            let block = &data[offset.min(end)..end];
            offset = end;
            (block, rs.checksum(block))
        })
        .collect();

    let mut out = Vec::with_capacity(layout.total_codewords());
    for i in 0..layout.max_data_words() {
        for (block, _) in &blocks {
            if let Some(&word) = block.get(i) {
                out.push(word);
            }
        }
    }
    for i in 0..layout.ec_words_per_block() {
        for (_, parity) in &blocks {
            out.push(parity[i]);
        }
    }
    out
}
