//! Symbol table and message decoding.
//!
//! Bits are grouped into 4-bit symbols, most significant bit first, and
//! each symbol is mapped through a fixed 16-entry table. The table is an
//! array indexed by the symbol value, so it is total by construction and no
//! missing-entry path can exist at runtime.

use super::Bitstream;
use serde::{Deserialize, Serialize};

/// Bits per symbol.
pub const SYMBOL_BITS: usize = 4;

/// Total mapping from every 4-bit symbol to one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    entries: [char; 16],
}

impl SymbolTable {
    /// The embedded channel's fixed alphabet.
    pub const DEFAULT: Self = Self {
        entries: [
            'H', 'E', 'L', 'L', 'O', ' ', 'W', 'O', 'R', 'L', 'D', '!', '✨', '🎉', '🚀', '💎',
        ],
    };

    /// Creates a table from an explicit 16-entry alphabet.
    pub fn new(entries: [char; 16]) -> Self {
        Self { entries }
    }

    /// Returns the character for a symbol value (low 4 bits).
    #[inline]
    pub fn char_at(&self, symbol: u8) -> char {
        self.entries[(symbol & 0x0F) as usize]
    }

    /// Decodes a bitstream into text.
    ///
    /// Bits are consumed left to right in groups of [`SYMBOL_BITS`]; a
    /// trailing group shorter than a full symbol is dropped.
    pub fn decode(&self, bits: &Bitstream) -> String {
        bits.bits()
            .chunks_exact(SYMBOL_BITS)
            .map(|chunk| {
                let symbol = chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b);
                self.char_at(symbol)
            })
            .collect()
    }

    /// Returns the first symbol value mapping to `c`, if any.
    ///
    /// The default alphabet repeats characters ('L', 'O'), so encoding
    /// picks the lowest symbol; decoding maps any of them back to the same
    /// character.
    pub fn encode_char(&self, c: char) -> Option<u8> {
        self.entries.iter().position(|&e| e == c).map(|i| i as u8)
    }

    /// Encodes a message into bits, most significant bit of each symbol
    /// first. Returns `None` when any character is outside the alphabet.
    pub fn encode_message(&self, message: &str) -> Option<Vec<u8>> {
        let mut bits = Vec::with_capacity(message.chars().count() * SYMBOL_BITS);
        for c in message.chars() {
            let symbol = self.encode_char(c)?;
            for shift in (0..SYMBOL_BITS).rev() {
                bits.push((symbol >> shift) & 1);
            }
        }
        Some(bits)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_exact() {
        let table = SymbolTable::DEFAULT;
        let decoded: String = (0u8..16).map(|s| table.char_at(s)).collect();
        assert_eq!(decoded, "HELLO WORLD!✨🎉🚀💎");
    }

    #[test]
    fn test_decode_groups_msb_first() {
        // 0000 0001 1010 -> H E D
        let bits = Bitstream::from_bits([0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0]);
        assert_eq!(SymbolTable::DEFAULT.decode(&bits), "HED");
    }

    #[test]
    fn test_trailing_partial_group_dropped() {
        let bits = Bitstream::from_bits([0, 0, 0, 0, 1, 1]);
        assert_eq!(SymbolTable::DEFAULT.decode(&bits), "H");
    }

    #[test]
    fn test_empty_bitstream_decodes_empty() {
        let bits = Bitstream::from_bits([]);
        assert_eq!(SymbolTable::DEFAULT.decode(&bits), "");
    }

    #[test]
    fn test_every_symbol_round_trips_through_its_char() {
        // The default table repeats characters, so the recovered symbol can
        // differ from the original, but it must decode to the same char.
        let table = SymbolTable::DEFAULT;
        for symbol in 0u8..16 {
            let c = table.char_at(symbol);
            let recovered = table.encode_char(c).unwrap();
            assert_eq!(table.char_at(recovered), c);
        }
    }

    #[test]
    fn test_injective_table_round_trips_exactly() {
        let table = SymbolTable::new([
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
        ]);
        for symbol in 0u8..16 {
            assert_eq!(table.encode_char(table.char_at(symbol)), Some(symbol));
        }
    }

    #[test]
    fn test_encode_decode_message() {
        let table = SymbolTable::DEFAULT;
        let bits = table.encode_message("HELLO WORLD!").unwrap();
        assert_eq!(bits.len(), 48);
        assert_eq!(table.decode(&Bitstream::from_bits(bits)), "HELLO WORLD!");
    }

    #[test]
    fn test_encode_rejects_unknown_char() {
        assert!(SymbolTable::DEFAULT.encode_message("HI").is_none());
    }
}
