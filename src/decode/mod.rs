//! Bitstream encoding and symbol decoding.
//!
//! Converts the per-window rpm series into bits via a fixed threshold, then
//! groups bits into 4-bit symbols and maps them through a static alphabet.

mod bitstream;
mod symbols;

pub use bitstream::Bitstream;
pub use symbols::{SymbolTable, SYMBOL_BITS};
