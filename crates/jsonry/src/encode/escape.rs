//! Escaping rules shared by everything that emits quoted text.

use std::io;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

enum Escape {
    Named(&'static str),
    Unicode(u32),
}

fn escape_for(c: char) -> Option<Escape> {
    match c {
        '"' => Some(Escape::Named("\\\"")),
        '\\' => Some(Escape::Named("\\\\")),
        '\u{8}' => Some(Escape::Named("\\b")),
        '\t' => Some(Escape::Named("\\t")),
        '\n' => Some(Escape::Named("\\n")),
        '\u{c}' => Some(Escape::Named("\\f")),
        '\r' => Some(Escape::Named("\\r")),
        // Line/paragraph separators break JavaScript string literals.
        '\u{2028}' | '\u{2029}' => Some(Escape::Unicode(c as u32)),
        c if (c as u32) < 0x20 => Some(Escape::Unicode(c as u32)),
        _ => None,
    }
}

fn write_escape<W: io::Write + ?Sized>(out: &mut W, esc: Escape) -> io::Result<()> {
    match esc {
        Escape::Named(s) => out.write_all(s.as_bytes()),
        Escape::Unicode(u) => {
            let buf = [
                b'\\',
                b'u',
                HEX[((u >> 12) & 0xF) as usize],
                HEX[((u >> 8) & 0xF) as usize],
                HEX[((u >> 4) & 0xF) as usize],
                HEX[(u & 0xF) as usize],
            ];
            out.write_all(&buf)
        }
    }
}

/// Writes `s` escaped, without surrounding quotes.
fn write_escaped<W: io::Write + ?Sized>(out: &mut W, s: &str) -> io::Result<()> {
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(esc) = escape_for(c) {
            if start < i {
                out.write_all(&s.as_bytes()[start..i])?;
            }
            write_escape(out, esc)?;
            start = i + c.len_utf8();
        }
    }
    if start < s.len() {
        out.write_all(&s.as_bytes()[start..])?;
    }
    Ok(())
}

/// Writes `s` escaped and wrapped in double quotes.
pub fn write_quoted<W: io::Write + ?Sized>(out: &mut W, s: &str) -> io::Result<()> {
    out.write_all(b"\"")?;
    write_escaped(out, s)?;
    out.write_all(b"\"")
}
