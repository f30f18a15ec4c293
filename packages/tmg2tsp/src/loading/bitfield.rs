//! Decoding of the hexadecimal traveler codes found on traveled-format edge
//! lines. Each hex digit holds four travelers: the bit with value `1 << b`
//! in digit `i` marks traveler `i * 4 + b`.

use crate::common::graph_data::TravelerSet;

/// Raised when a traveler code contains something other than hex digits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected character {found:?} in traveler code {code:?}")]
pub struct BitfieldError {
    pub code: String,
    pub found: char,
}

/// Convert a traveler code into the set of traveler indices it marks. A code
/// with no set bits produces an empty set
pub fn decode_travelers(code: &str) -> Result<TravelerSet, BitfieldError> {
    let mut numbers = Vec::new();

    for (digit_inx, c) in code.chars().enumerate() {
        let nibble = c.to_digit(16).ok_or_else(|| BitfieldError {
            code: code.to_string(),
            found: c,
        })?;
        for bit in 0..4 {
            if nibble & (1 << bit) != 0 {
                numbers.push((digit_inx * 4 + bit) as u32);
            }
        }
    }

    Ok(TravelerSet { numbers })
}
