use std::io::{self, Write};

/// Writes `text` to stdout. A closed pipe (`skyledger ... | head`) is not an
/// error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_stdout(text.as_bytes(), false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_stdout(text.as_bytes(), true)
}

fn write_stdout(bytes: &[u8], newline: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    ignore_broken_pipe(write_to(&mut stdout, bytes, newline))
}

fn write_to(writer: &mut dyn Write, bytes: &[u8], newline: bool) -> io::Result<()> {
    writer.write_all(bytes)?;
    if newline {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
