use crate::navigation::percent_decode;

/// Parse the `modes` URL query parameter into a mode sequence.
///
/// The value is percent-decoded, anything after a stray `?` is dropped
/// (older shared links carried a query suffix inside the value), and the
/// remainder splits on commas. Casing is preserved.
#[must_use]
pub fn parse_modes_param(raw: &str) -> Vec<String> {
    let decoded = percent_decode(raw);
    decoded
        .split('?')
        .next()
        .unwrap_or("")
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Toggle a single mode in a mode sequence: the symmetric difference with
/// the singleton `{toggled}`. Surviving modes keep their relative order; a
/// newly enabled mode is appended. Self-inverse.
#[must_use]
pub fn symmetric_difference(modes: &[String], toggled: &str) -> Vec<String> {
    let mut next: Vec<String> = modes.iter().filter(|m| *m != toggled).cloned().collect();
    if next.len() == modes.len() {
        next.push(toggled.to_string());
    }
    next
}
