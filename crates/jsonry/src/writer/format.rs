use std::io;

/// Insignificant whitespace policy of a checked writer.
pub trait Formatter {
    /// Called before an array element or object property at `depth`.
    fn before_element<W: io::Write + ?Sized>(
        &mut self,
        out: &mut W,
        depth: usize,
        first: bool,
    ) -> io::Result<()>;

    /// Called before a closing bracket; `depth` is the depth after closing.
    fn before_close<W: io::Write + ?Sized>(
        &mut self,
        out: &mut W,
        depth: usize,
        empty: bool,
    ) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFormatter;

impl Formatter for CompactFormatter {
    fn before_element<W: io::Write + ?Sized>(
        &mut self,
        out: &mut W,
        _depth: usize,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { out.write_all(b",") }
    }

    fn before_close<W: io::Write + ?Sized>(
        &mut self,
        _out: &mut W,
        _depth: usize,
        _empty: bool,
    ) -> io::Result<()> {
        Ok(())
    }
}

/// One element per line; empty compounds stay on one line (`[]`, `{}`).
#[derive(Debug, Clone)]
pub struct PrettyFormatter {
    width: usize,
    indent_cache: String,
}

impl PrettyFormatter {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            indent_cache: String::new(),
        }
    }

    fn write_indent<W: io::Write + ?Sized>(&mut self, out: &mut W, depth: usize) -> io::Result<()> {
        let indent = depth * self.width;
        if indent == 0 {
            return Ok(());
        }
        if self.indent_cache.len() < indent {
            self.indent_cache
                .extend(core::iter::repeat_n(' ', indent - self.indent_cache.len()));
        }
        out.write_all(&self.indent_cache.as_bytes()[..indent])
    }
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Formatter for PrettyFormatter {
    fn before_element<W: io::Write + ?Sized>(
        &mut self,
        out: &mut W,
        depth: usize,
        first: bool,
    ) -> io::Result<()> {
        out.write_all(if first { b"\n" } else { b",\n" })?;
        self.write_indent(out, depth)
    }

    fn before_close<W: io::Write + ?Sized>(
        &mut self,
        out: &mut W,
        depth: usize,
        empty: bool,
    ) -> io::Result<()> {
        if empty {
            return Ok(());
        }
        out.write_all(b"\n")?;
        self.write_indent(out, depth)
    }
}
