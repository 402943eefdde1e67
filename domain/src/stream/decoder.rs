//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! Transport chunks are arbitrary byte slices, so a multi-byte character may
//! be split across two chunks. [`Utf8StreamDecoder`] holds back the
//! incomplete tail of a chunk and prepends it to the next one, so every
//! character is decoded exactly once and in order.

use crate::core::error::DomainError;

/// Stateful decoder turning a sequence of byte chunks into text.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    /// Bytes of an incomplete trailing character (at most 3)
    pending: Vec<u8>,
    /// Total bytes decoded so far, for error offsets
    consumed: usize,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all complete characters it finishes.
    ///
    /// An incomplete character at the end of the chunk is kept for the next
    /// call. Invalid sequences fail with [`DomainError::InvalidUtf8`].
    pub fn decode(&mut self, chunk: &[u8]) -> Result<String, DomainError> {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        match std::str::from_utf8(&bytes) {
            Ok(text) => {
                self.consumed += bytes.len();
                Ok(text.to_owned())
            }
            Err(e) => {
                let valid = e.valid_up_to();
                if e.error_len().is_some() {
                    return Err(DomainError::InvalidUtf8 {
                        offset: self.consumed + valid,
                    });
                }
                let (complete, tail) = bytes.split_at(valid);
                let text = std::str::from_utf8(complete)
                    .map_err(|_| DomainError::InvalidUtf8 {
                        offset: self.consumed,
                    })?
                    .to_owned();
                self.consumed += valid;
                self.pending = tail.to_vec();
                Ok(text)
            }
        }
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Signal end of stream. Fails if a character was left incomplete.
    pub fn finish(&mut self) -> Result<(), DomainError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            let pending = self.pending.len();
            self.pending.clear();
            Err(DomainError::TruncatedUtf8 { pending })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_chunks_pass_through() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"Hel").unwrap(), "Hel");
        assert_eq!(decoder.decode(b"lo").unwrap(), "lo");
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn test_split_multibyte_character() {
        // "é" is 0xC3 0xA9
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(&[b'c', b'a', b'f', 0xC3]).unwrap(), "caf");
        assert_eq!(decoder.pending_len(), 1);
        assert_eq!(decoder.decode(&[0xA9, b'!']).unwrap(), "é!");
        assert_eq!(decoder.pending_len(), 0);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn test_four_byte_character_across_three_chunks() {
        let crab = "🦀".as_bytes();
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(&crab[..1]).unwrap(), "");
        assert_eq!(decoder.decode(&crab[1..3]).unwrap(), "");
        assert_eq!(decoder.decode(&crab[3..]).unwrap(), "🦀");
    }

    #[test]
    fn test_invalid_sequence_reports_offset() {
        let mut decoder = Utf8StreamDecoder::new();
        decoder.decode(b"ok ").unwrap();
        let err = decoder.decode(&[b'x', 0xFF]).unwrap_err();
        assert_eq!(err, DomainError::InvalidUtf8 { offset: 4 });
    }

    #[test]
    fn test_finish_with_pending_bytes_fails() {
        let mut decoder = Utf8StreamDecoder::new();
        decoder.decode(&[0xE2, 0x82]).unwrap();
        assert_eq!(
            decoder.finish().unwrap_err(),
            DomainError::TruncatedUtf8 { pending: 2 }
        );
    }

    #[test]
    fn test_empty_chunk() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"").unwrap(), "");
    }
}
