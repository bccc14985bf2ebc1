//! Newline framing over arbitrarily fragmented byte chunks.
//!
//! Framing happens on raw bytes and text decoding happens per complete line.
//! `\n` never occurs inside a multi-byte UTF-8 sequence, so a character split
//! across two chunks is reassembled before it is decoded.

/// Accumulates bytes that follow the last newline seen so far.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return the complete lines it finishes, in order.
    ///
    /// The returned iterator is lazy: lines are removed from the buffer as
    /// they are yielded, and anything not yet pulled when the iterator is
    /// dropped stays buffered. The newline itself is not part of the line.
    pub fn feed(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.pending.extend_from_slice(chunk);
        Lines {
            pending: &mut self.pending,
            start: 0,
        }
    }

    /// Bytes received after the last newline.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Take the unterminated remainder as a final line, if there is one.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Lines completed by one [`LineFramer::feed`] call.
pub struct Lines<'a> {
    pending: &'a mut Vec<u8>,
    start: usize,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rest = &self.pending[self.start..];
        let offset = rest.iter().position(|b| *b == b'\n')?;
        // Invalid UTF-8 becomes U+FFFD rather than failing the stream.
        let line = String::from_utf8_lossy(&rest[..offset]).into_owned();
        self.start += offset + 1;
        Some(line)
    }
}

impl Drop for Lines<'_> {
    fn drop(&mut self) {
        self.pending.drain(..self.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(framer: &mut LineFramer, chunks: &[&[u8]]) -> Vec<String> {
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(framer.feed(chunk));
        }
        out
    }

    #[test]
    fn single_chunk_with_many_lines() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, &[&b"a\nbb\nccc\n"[..]]);
        assert_eq!(lines, vec!["a", "bb", "ccc"]);
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn trailing_partial_line_stays_buffered() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, &[&b"abc\ndef"[..]]);
        assert_eq!(lines, vec!["abc"]);
        assert_eq!(framer.pending(), b"def");

        let lines = feed_all(&mut framer, &[&b"ghi"[..]]);
        assert!(lines.is_empty());
        assert_eq!(framer.pending(), b"defghi");
    }

    #[test]
    fn line_spanning_chunks_is_joined() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, &[&b"{\"te"[..], &b"xt\":"[..], &b"\"x\"}\n"[..]]);
        assert_eq!(lines, vec![r#"{"text":"x"}"#]);
    }

    #[test]
    fn every_split_point_yields_same_lines() {
        let input = "héllo\n{\"text\":\"日本語\"}\n\nlast 🚀 line\n".as_bytes();
        let expected = vec!["héllo", r#"{"text":"日本語"}"#, "", "last 🚀 line"];

        for split in 0..=input.len() {
            let mut framer = LineFramer::new();
            let lines = feed_all(&mut framer, &[&input[..split], &input[split..]]);
            assert_eq!(lines, expected, "split at byte {split}");
            assert!(framer.pending().is_empty());
        }
    }

    #[test]
    fn one_byte_at_a_time() {
        let input = "ünï\ncödé 🚀\n".as_bytes();
        let mut framer = LineFramer::new();
        let mut lines = Vec::new();
        for byte in input {
            lines.extend(framer.feed(std::slice::from_ref(byte)));
        }
        assert_eq!(lines, vec!["ünï", "cödé 🚀"]);
    }

    #[test]
    fn unconsumed_lines_remain_after_early_drop() {
        let mut framer = LineFramer::new();
        let first = framer.feed(b"one\ntwo\nthr").next();
        assert_eq!(first.as_deref(), Some("one"));
        assert_eq!(framer.pending(), b"two\nthr");

        let rest: Vec<String> = framer.feed(b"ee\n").collect();
        assert_eq!(rest, vec!["two", "three"]);
    }

    #[test]
    fn finish_flushes_remainder_once() {
        let mut framer = LineFramer::new();
        let _ = feed_all(&mut framer, &[&b"abc\ndef"[..]]);
        assert_eq!(framer.finish().as_deref(), Some("def"));
        assert_eq!(framer.finish(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, &[&b"ok\n\xff\xfe\nok2\n"[..]]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ok");
        assert!(lines[1].contains('\u{FFFD}'));
        assert_eq!(lines[2], "ok2");
    }
}
