/// Lowercase `input` and collapse every run of whitespace or punctuation into `separator`.
///
/// Leading and trailing separators are dropped: `"Winston-Salem "` with `'_'` becomes
/// `"winston_salem"`.
pub fn slugify(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending && !out.is_empty() {
                out.push(separator);
            }
            pending = false;
            out.extend(c.to_lowercase());
        } else {
            pending = true;
        }
    }

    out
}
