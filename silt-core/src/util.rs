/// Writes `values` into `out` through `f`, separating consecutive entries.
pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut first = true;
    for value in values {
        if !first {
            out.push_str(separator);
        }
        first = false;
        f(out, value);
    }
}
