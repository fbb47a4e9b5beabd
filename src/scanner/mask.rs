//! Comment masking
//!
//! Blanks out `//` and `/* */` comments so commented-out imports are never
//! scanned. Every masked byte becomes a space (newlines are kept), so byte
//! offsets and line numbers of the remaining code are unchanged.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(u8),
    Template,
}

pub(crate) fn mask_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            State::Code => match (byte, next) {
                (b'/', Some(b'/')) => {
                    state = State::LineComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = State::BlockComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'\'' | b'"', _) => {
                    state = State::Quoted(byte);
                    out.push(byte);
                }
                (b'`', _) => {
                    state = State::Template;
                    out.push(byte);
                }
                _ => out.push(byte),
            },
            State::LineComment => {
                if byte == b'\n' {
                    state = State::Code;
                    out.push(b'\n');
                } else {
                    out.push(b' ');
                }
            }
            State::BlockComment => {
                if byte == b'*' && next == Some(b'/') {
                    state = State::Code;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                out.push(if byte == b'\n' { b'\n' } else { b' ' });
            }
            State::Quoted(quote) => {
                if byte == b'\\' && next.is_some() {
                    out.push(byte);
                    out.push(bytes[i + 1]);
                    i += 2;
                    continue;
                }
                // Unterminated literals end at the line break
                if byte == quote || byte == b'\n' {
                    state = State::Code;
                }
                out.push(byte);
            }
            State::Template => {
                if byte == b'\\' && next.is_some() {
                    out.push(byte);
                    out.push(bytes[i + 1]);
                    i += 2;
                    continue;
                }
                if byte == b'`' {
                    state = State::Code;
                }
                out.push(byte);
            }
        }

        i += 1;
    }

    // Only whole comments are replaced and every replacement is ASCII, so the
    // buffer is still valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|_| source.to_string())
}
