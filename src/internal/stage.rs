//! Staged word state machine.
//!
//! A [`StagedWord`] holds between zero and four bytes of one 32-bit word while
//! it is assembled from, or drained into, a byte-granular stream. Bytes are
//! always packed little-endian: byte 0 occupies bits 0-7, byte 1 bits 8-15,
//! and so on. A partial word keeps every bit above its valid bytes cleared, so
//! a stale high byte can never leak into a later assembly.

use super::constants::WORD_BYTES;

/// Bytes-in-flight for one 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum StagedWord {
    /// No bytes staged
    #[default]
    Empty,
    /// 1 to 3 valid low-order bytes
    Partial {
        /// Packed bytes, upper bits zero
        word: u32,
        /// Number of valid bytes (1..=3)
        len: u8,
    },
    /// A complete word waiting to be flushed or drained
    Full(u32),
}

impl StagedWord {
    /// Stage a complete word for byte-wise draining
    #[inline(always)]
    pub(crate) const fn from_word(word: u32) -> Self {
        StagedWord::Full(word)
    }

    /// Number of staged bytes (0..=4)
    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        match self {
            StagedWord::Empty => 0,
            StagedWord::Partial { len, .. } => *len as usize,
            StagedWord::Full(_) => WORD_BYTES,
        }
    }

    #[inline(always)]
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, StagedWord::Empty)
    }

    #[inline(always)]
    pub(crate) const fn is_full(&self) -> bool {
        matches!(self, StagedWord::Full(_))
    }

    /// The complete word, if all four bytes are staged
    #[inline(always)]
    pub(crate) const fn full_word(&self) -> Option<u32> {
        match self {
            StagedWord::Full(word) => Some(*word),
            _ => None,
        }
    }

    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        *self = StagedWord::Empty;
    }

    /// Move the staged bytes out, leaving `Empty` behind
    #[inline(always)]
    pub(crate) fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Append one byte at the next little-endian offset.
    ///
    /// Returns `false` without modifying anything if a complete word is
    /// already staged; the caller must flush it first.
    pub(crate) fn push_byte(&mut self, byte: u8) -> bool {
        *self = match *self {
            StagedWord::Empty => StagedWord::Partial {
                word: byte as u32,
                len: 1,
            },
            StagedWord::Partial { word, len } => {
                let word = word | ((byte as u32) << (8 * len as u32));
                if len as usize + 1 == WORD_BYTES {
                    StagedWord::Full(word)
                } else {
                    StagedWord::Partial { word, len: len + 1 }
                }
            }
            StagedWord::Full(_) => return false,
        };
        true
    }

    /// The lowest staged byte, without removing it
    #[inline(always)]
    pub(crate) const fn peek_byte(&self) -> Option<u8> {
        match self {
            StagedWord::Empty => None,
            StagedWord::Partial { word, .. } | StagedWord::Full(word) => Some((*word & 0xFF) as u8),
        }
    }

    /// Remove the lowest staged byte, shifting the rest down.
    pub(crate) fn pop_byte(&mut self) -> Option<u8> {
        let (word, len) = match *self {
            StagedWord::Empty => return None,
            StagedWord::Partial { word, len } => (word, len as usize),
            StagedWord::Full(word) => (word, WORD_BYTES),
        };

        let byte = (word & 0xFF) as u8;
        *self = match len - 1 {
            0 => StagedWord::Empty,
            remaining => StagedWord::Partial {
                word: word >> 8,
                len: remaining as u8,
            },
        };
        Some(byte)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Assembly
    // =========================================================================

    #[test]
    fn default_is_empty() {
        let staged = StagedWord::default();
        assert!(staged.is_empty());
        assert_eq!(staged.len(), 0);
        assert_eq!(staged.full_word(), None);
    }

    #[test]
    fn push_assembles_little_endian() {
        let mut staged = StagedWord::Empty;
        for (i, byte) in [0x11u8, 0x22, 0x33].into_iter().enumerate() {
            assert!(staged.push_byte(byte));
            assert_eq!(staged.len(), i + 1);
            assert!(!staged.is_full());
        }
        assert!(staged.push_byte(0x44));
        assert!(staged.is_full());
        assert_eq!(staged.full_word(), Some(0x4433_2211));
    }

    #[test]
    fn push_into_full_word_is_rejected() {
        let mut staged = StagedWord::from_word(0xDEAD_BEEF);
        assert!(!staged.push_byte(0x01));
        assert_eq!(staged, StagedWord::Full(0xDEAD_BEEF));
    }

    #[test]
    fn partial_word_keeps_upper_bits_clear() {
        let mut staged = StagedWord::Empty;
        staged.push_byte(0xFF);
        staged.push_byte(0xEE);
        assert_eq!(
            staged,
            StagedWord::Partial {
                word: 0x0000_EEFF,
                len: 2
            }
        );
    }

    // =========================================================================
    // Draining
    // =========================================================================

    #[test]
    fn pop_drains_lsb_first() {
        let mut staged = StagedWord::from_word(0x4433_2211);
        assert_eq!(staged.pop_byte(), Some(0x11));
        assert_eq!(staged.len(), 3);
        assert_eq!(staged.pop_byte(), Some(0x22));
        assert_eq!(staged.pop_byte(), Some(0x33));
        assert_eq!(staged.pop_byte(), Some(0x44));
        assert!(staged.is_empty());
        assert_eq!(staged.pop_byte(), None);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut staged = StagedWord::from_word(0x0000_00AB);
        assert_eq!(staged.peek_byte(), Some(0xAB));
        assert_eq!(staged.len(), 4);
        staged.clear();
        assert_eq!(staged.peek_byte(), None);
    }

    #[test]
    fn pop_drains_partial_assembly() {
        let mut staged = StagedWord::Empty;
        staged.push_byte(0xA1);
        staged.push_byte(0xB2);
        assert_eq!(staged.pop_byte(), Some(0xA1));
        assert_eq!(staged.pop_byte(), Some(0xB2));
        assert_eq!(staged.pop_byte(), None);
    }

    #[test]
    fn drained_partial_can_be_refilled() {
        let mut staged = StagedWord::from_word(0x4433_2211);
        staged.pop_byte();
        staged.pop_byte();
        staged.pop_byte();
        // One byte left (0x44) in the low position
        assert_eq!(staged, StagedWord::Partial { word: 0x44, len: 1 });
        assert!(staged.push_byte(0x55));
        assert_eq!(
            staged,
            StagedWord::Partial {
                word: 0x5544,
                len: 2
            }
        );
    }

    #[test]
    fn take_and_clear_leave_empty() {
        let mut staged = StagedWord::from_word(7);
        let taken = staged.take();
        assert_eq!(taken, StagedWord::Full(7));
        assert!(staged.is_empty());

        let mut staged = StagedWord::Partial { word: 1, len: 1 };
        staged.clear();
        assert!(staged.is_empty());
    }
}
