//! `application/x-www-form-urlencoded` and URL path decoding

/// Percent-decode `input` to raw bytes. With `plus_as_space`, `+` decodes to a
/// space as in form bodies and query strings. Malformed escapes are kept literally.
pub fn percent_decode_bytes(input: &[u8], plus_as_space: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' if i + 2 < input.len() => {
                match (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                        continue;
                    }
                    _ => out.push(b'%'),
                }
            }
            b'+' if plus_as_space => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    out
}

/// Percent-decode a URL path into text, replacing invalid UTF-8
pub fn percent_decode(input: &str, plus_as_space: bool) -> String {
    String::from_utf8_lossy(&percent_decode_bytes(input.as_bytes(), plus_as_space)).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Iterate decoded `(name, value)` pairs of an urlencoded byte string
pub fn parse_pairs(input: &[u8]) -> impl Iterator<Item = (Vec<u8>, Vec<u8>)> + '_ {
    input
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.iter().position(|&b| b == b'=') {
            Some(eq) => (
                percent_decode_bytes(&pair[..eq], true),
                percent_decode_bytes(&pair[eq + 1..], true),
            ),
            None => (percent_decode_bytes(pair, true), Vec::new()),
        })
}

/// First value for `name`, if present, as raw bytes
pub fn form_value(input: &[u8], name: &str) -> Option<Vec<u8>> {
    parse_pairs(input)
        .find(|(n, _)| n.as_slice() == name.as_bytes())
        .map(|(_, v)| v)
}
