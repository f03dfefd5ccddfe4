use std::io::{self, BufRead};

/// Iterates over `(line number, line)` pairs, starting from 1.
///
/// Invalid UTF-8 is replaced instead of failing the whole read, so that a
/// garbled line is reported as a malformed record like any other.
pub fn lines(
    reader: impl BufRead,
) -> impl Iterator<Item = io::Result<(usize, String)>> {
    reader.split(b'\n').enumerate().map(|(idx, line)| {
        let line = line?;
        let line = String::from_utf8_lossy(&line);

        Ok((idx + 1, line.trim_end_matches('\r').to_owned()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        let input: &[u8] = b"first\r\nsec\xffond\n\nlast";

        let target: Vec<_> =
            lines(input).collect::<io::Result<_>>().unwrap();

        assert_eq!(
            vec![
                (1, "first".to_owned()),
                (2, "sec\u{fffd}ond".to_owned()),
                (3, "".to_owned()),
                (4, "last".to_owned()),
            ],
            target
        );
    }
}
