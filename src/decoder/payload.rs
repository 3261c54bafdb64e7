use crate::error::{QrError, Result};
use crate::models::Version;
use crate::modes::alphanumeric::AlphanumericCodec;
use crate::modes::byte::ByteCodec;
use crate::modes::numeric::NumericCodec;
use crate::modes::{ECI_INDICATOR, Mode, Segment};
use crate::symbol::bit_buffer::BitBuffer;
use crate::symbol::tables::BlockLayout;

/// Undo block interleaving and return the data codewords in block order.
/// Parity codewords are split off and dropped.
pub fn deinterleave(codewords: &[u8], layout: &BlockLayout) -> Result<Vec<u8>> {
    let total = layout.total_codewords();
    if codewords.len() < total {
        return Err(QrError::MalformedSymbol(format!(
            "expected {total} codewords, read {}",
            codewords.len()
        )));
    }

    let specs = layout.blocks();
    let mut blocks: Vec<Vec<u8>> = specs
        .iter()
        .map(|spec| Vec::with_capacity(spec.data_words))
        .collect();

    let mut idx = 0;
    for i in 0..layout.max_data_words() {
        for (block, spec) in blocks.iter_mut().zip(specs) {
            if i < spec.data_words {
                block.push(codewords[idx]);
                idx += 1;
            }
        }
    }

    Ok(blocks.concat())
}

/// Parse mode segments from the data codewords until a terminator or the
/// end of the stream. ECI headers are skipped.
pub fn parse_segments(data_codewords: &[u8], version: Version) -> Result<Vec<Segment>> {
    let mut reader = BitBuffer::from_bytes(data_codewords.to_vec());
    let mut segments = Vec::new();

    loop {
        if reader.remaining_bits() < 4 {
            break;
        }
        let indicator = reader.read_bits(4) as u8;
        if indicator == 0 {
            break;
        }
        if indicator == ECI_INDICATOR {
            skip_eci(&mut reader)?;
            continue;
        }

        let mode = Mode::from_indicator(indicator).ok_or_else(|| {
            QrError::MalformedSymbol(format!("unknown mode indicator {indicator:04b}"))
        })?;
        if mode == Mode::Kanji {
            return Err(QrError::UnsupportedMode(Mode::Kanji));
        }

        let count_bits = mode.char_count_bits(version);
        let count = read_field(&mut reader, count_bits)? as usize;
        let text = match mode {
            Mode::Numeric => NumericCodec::decode(&mut reader, count)?,
            Mode::Alphanumeric => AlphanumericCodec::decode(&mut reader, count)?,
            Mode::Byte => ByteCodec::decode(&mut reader, count)?,
            Mode::Kanji => return Err(QrError::UnsupportedMode(Mode::Kanji)),
        };
        segments.push(Segment::new(mode, text));
    }

    Ok(segments)
}

/// ECI designator: 1, 2 or 3 bytes selected by its leading bits.
/// The payload is still read as UTF-8.
fn skip_eci(reader: &mut BitBuffer) -> Result<u32> {
    let mut eci = read_field(reader, 8)?;
    if (eci & 0x80) != 0 {
        eci = ((eci & 0x7F) << 8) | read_field(reader, 8)?;
        if (eci & 0x4000) != 0 {
            eci = ((eci & 0x3FFF) << 8) | read_field(reader, 8)?;
        }
    }
    Ok(eci)
}

fn read_field(reader: &mut BitBuffer, bits: usize) -> Result<u32> {
    if reader.remaining_bits() < bits {
        return Err(QrError::MalformedSymbol(format!(
            "stream ended inside a {bits}-bit field"
        )));
    }
    Ok(reader.read_bits(bits))
}
