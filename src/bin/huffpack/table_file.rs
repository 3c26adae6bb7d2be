//! Reading and writing frequency tables as plain text.
//!
//! One `<byte> <count>` pair per line, both in decimal. Everything after a `#`
//! is a comment, and blank lines are skipped.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use tracing::debug;

pub fn read(path: &Path) -> Result<BTreeMap<u8, u64>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading frequency table {}", path.display()))?;
    let table = parse(&text).wrap_err_with(|| format!("parsing {}", path.display()))?;
    debug!("read {} table entries from {}", table.len(), path.display());
    Ok(table)
}

pub fn parse(text: &str) -> Result<BTreeMap<u8, u64>> {
    let mut table = BTreeMap::new();
    for (idx, line) in text.lines().enumerate() {
        let line_nr = idx + 1;
        let content = match line.split_once('#') {
            Some((content, _comment)) => content,
            None => line,
        };
        let mut fields = content.split_whitespace();
        let Some(byte) = fields.next() else {
            continue;
        };
        let count = fields
            .next()
            .ok_or_else(|| eyre!("line {}: missing count after byte {}", line_nr, byte))?;
        if let Some(extra) = fields.next() {
            bail!("line {}: unexpected field {:?}", line_nr, extra);
        }

        let byte: u8 = byte
            .parse()
            .wrap_err_with(|| format!("line {}: invalid byte value {:?}", line_nr, byte))?;
        let count: u64 = count
            .parse()
            .wrap_err_with(|| format!("line {}: invalid count {:?}", line_nr, count))?;
        if table.insert(byte, count).is_some() {
            bail!("line {}: byte {} appears twice", line_nr, byte);
        }
    }
    Ok(table)
}

pub fn render(table: &BTreeMap<u8, u64>) -> String {
    let mut text = String::from("# byte count\n");
    for (byte, count) in table {
        // writing into a String cannot fail
        let _ = writeln!(text, "{} {}", byte, count);
    }
    text
}

pub fn write(path: &Path, table: &BTreeMap<u8, u64>) -> Result<()> {
    std::fs::write(path, render(table))
        .wrap_err_with(|| format!("writing frequency table {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{parse, render};

    #[test]
    fn comments_and_blank_lines() {
        let table = parse("# header\n\n97 5   # a\n 98\t2\n99 1\n").unwrap();
        assert_eq!(
            table.into_iter().collect::<Vec<_>>(),
            vec![(97, 5), (98, 2), (99, 1)]
        );
    }

    #[test]
    fn rendered_table_parses_back() {
        let table = parse("10 3\n255 18446744073709551615\n0 0\n").unwrap();
        assert_eq!(parse(&render(&table)).unwrap(), table);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse("97\n").is_err());
        assert!(parse("256 1\n").is_err());
        assert!(parse("97 -1\n").is_err());
        assert!(parse("97 1 2\n").is_err());
        assert!(parse("97 1\n97 2\n").is_err());
    }
}
