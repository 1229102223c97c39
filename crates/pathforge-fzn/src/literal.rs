//! Helpers for FlatZinc expressions and identifiers.

/// Element `pos` (1-based) of an array variable: `name[pos]`.
pub fn var_at_pos(name: &str, pos: usize) -> String {
    format!("{name}[{pos}]")
}

/// All elements of an array variable: `name[1]`, ..., `name[len]`.
pub fn var_positions(name: &str, len: usize) -> Vec<String> {
    (1..=len).map(|pos| var_at_pos(name, pos)).collect()
}

/// `len` copies of the same literal.
pub fn repeated(value: impl ToString, len: usize) -> Vec<String> {
    vec![value.to_string(); len]
}

/// Array literal: `[a, b, c]`.
pub fn array_literal<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    format!("[{}]", join(items))
}

/// Set literal: `{a, b, c}`.
pub fn set_literal<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    format!("{{{}}}", join(items))
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Turns an arbitrary string into a legal FlatZinc identifier.
///
/// Identifiers that are already legal are returned unchanged. Otherwise every
/// illegal byte is replaced by `A` followed by its decimal value; digits and
/// `_` are illegal only as the first character.
pub fn sanitize_identifier(identifier: &str) -> String {
    if identifier.is_empty() {
        return "empty".to_string();
    }
    let bytes = identifier.as_bytes();
    let legal = bytes[0].is_ascii_alphabetic()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'_');
    if legal {
        return identifier.to_string();
    }

    let mut out = String::with_capacity(identifier.len() * 2);
    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_alphabetic() || (i > 0 && (b.is_ascii_digit() || b == b'_')) {
            out.push(b as char);
        } else {
            out.push('A');
            out.push_str(&b.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(var_at_pos("x", 3), "x[3]");
        assert_eq!(var_positions("x", 2), vec!["x[1]", "x[2]"]);
        assert_eq!(array_literal(repeated(1, 3)), "[1, 1, 1]");
        assert_eq!(set_literal(["2", "5"]), "{2, 5}");
        assert_eq!(array_literal(Vec::<String>::new()), "[]");
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("storageCost"), "storageCost");
        assert_eq!(sanitize_identifier("cost_2"), "cost_2");
        assert_eq!(sanitize_identifier(""), "empty");
        assert_eq!(sanitize_identifier("storage-cost"), "storageA45cost");
        assert_eq!(sanitize_identifier("1st"), "A49st");
        assert_eq!(sanitize_identifier("_x"), "A95x");
    }
}
