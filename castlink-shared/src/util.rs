//! Small helpers shared by the castlink crates.

use std::fmt::Write;

/// Render a byte region as offset/hex/ASCII lines for trace logging.
///
/// Output is 16 bytes per line:
///
/// ```text
/// 0000  00 00 00 54 08 00 12 0a  72 65 63 65 69 76 65 72  |...T....receiver|
/// ```
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in data.chunks(16).enumerate() {
        let _ = write!(out, "{:04x} ", line * 16);
        for (i, b) in chunk.iter().enumerate() {
            let sep = if i == 8 { "  " } else { " " };
            let _ = write!(out, "{sep}{b:02x}");
        }
        for i in chunk.len()..16 {
            let sep = if i == 8 { "    " } else { "   " };
            out.push_str(sep);
        }
        out.push_str("  |");
        for &b in chunk {
            out.push(if (0x20..0x7F).contains(&b) {
                b as char
            } else {
                '.'
            });
        }
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump_shape() {
        let dump = hex_dump(b"receiver-0 and some more text!!!");
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000 "));
        assert!(lines[1].starts_with("0010 "));
        assert!(lines[0].ends_with("|receiver-0 and s|"));
    }

    #[test]
    fn test_hex_dump_non_printable() {
        let dump = hex_dump(&[0x00, 0x41, 0xFF]);
        assert!(dump.contains("00 41 ff"));
        assert!(dump.ends_with("|.A.|\n"));
    }
}
