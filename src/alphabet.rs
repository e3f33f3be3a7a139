//! Input alphabet of the transition table.
//!
//! Digits map to symbols `0..=9` and ASCII letters, case-folded, to
//! `10..=35`. Every other byte is unmapped and skipped by traversal, so
//! `"a-b"` and `"ab"` walk the same path.

/// Number of recognized input symbols.
pub const SYMBOL_COUNT: usize = 36;

/// Lane holding identifiers rather than transitions.
pub const ID_LANE: usize = SYMBOL_COUNT;

/// Symbol lanes plus the identifier lane.
pub const LANE_COUNT: usize = SYMBOL_COUNT + 1;

const UNMAPPED: u8 = u8::MAX;

static SYMBOL_MAP: [u8; 256] = build_symbol_map();

const fn build_symbol_map() -> [u8; 256] {
    let mut map = [UNMAPPED; 256];
    let mut b = 0usize;
    while b < 256 {
        let c = b as u8;
        map[b] = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'z' => c - b'a' + 10,
            b'A'..=b'Z' => c - b'A' + 10,
            _ => UNMAPPED,
        };
        b += 1;
    }
    map
}

/// Symbol id for `byte`, or `None` when the byte is skipped.
#[inline]
pub fn symbol_of(byte: u8) -> Option<usize> {
    match SYMBOL_MAP[byte as usize] {
        UNMAPPED => None,
        s => Some(s as usize),
    }
}

/// Iterate over the symbols of `pattern`, skipping unmapped bytes.
#[inline]
pub fn symbols(pattern: &[u8]) -> impl Iterator<Item = usize> + '_ {
    pattern.iter().filter_map(|&b| symbol_of(b))
}
