use crate::group::Group;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Writes a human readable listing of the groups, one paragraph per group.
pub fn serialise<W: Write>(groups: &[Group], output: W) -> Result<()> {
    let mut writer = BufWriter::new(output);
    write_groups(&mut writer, groups).context("Failed to write group listing.")?;
    writer.flush().context("Failed to write group listing.")?;
    Ok(())
}

fn write_groups<W: Write>(buf: &mut W, groups: &[Group]) -> Result<()> {
    for group in groups {
        write_group(buf, group)?;
    }
    Ok(())
}

fn write_group<W: Write>(buf: &mut W, group: &Group) -> Result<()> {
    write!(buf, "#{} ", group.index)?;
    write_ts(buf, group.anchor_start)?;
    write!(buf, " --> ")?;
    write_ts(buf, group.last().end)?;
    writeln!(buf, " ({} captions)", group.members.len())?;
    for caption in &group.members {
        if caption.speaker.is_empty() {
            writeln!(buf, "{}", caption.plain_text)?;
        } else {
            writeln!(buf, "[{}] {}", caption.speaker, caption.plain_text)?;
        }
    }
    writeln!(buf)?;
    Ok(())
}

/// Formats fractional seconds as `HH:MM:SS,mmm`.
pub fn format_ts(seconds: f64) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_ts(&mut buf, seconds);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_ts<W: Write>(buf: &mut W, seconds: f64) -> Result<()> {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = total_millis % 1000;
    write!(
        buf,
        "{:02}:{:02}:{:02},{:03}",
        hours, minutes, seconds, millis
    )?;
    Ok(())
}
