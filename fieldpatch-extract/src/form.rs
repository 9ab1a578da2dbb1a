//! Dirty-field extraction over flat form input.

use std::collections::HashMap;

/// Rewrites each submitted form key into canonical path notation.
///
/// Form encodings spell map entries with brackets (`meta[color]`); the
/// canonical notation uses parens (`meta(color)`). Only bracket groups that
/// hold an identifier are rewritten; numeric index groups (`arr[0]`) and
/// malformed groups pass through untouched. Flat input has no nesting to
/// walk, so each key yields exactly one path. Values carry no path
/// information and are never inspected.
#[must_use]
pub fn form_dirty_fields(form: &HashMap<String, Vec<String>>) -> Vec<String> {
    form.keys().map(|key| rewrite_map_references(key)).collect()
}

fn rewrite_map_references(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut rest = key;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match leading_identifier_len(after).filter(|len| after[*len..].starts_with(']')) {
            Some(len) => {
                out.push('(');
                out.push_str(&after[..len]);
                out.push(')');
                rest = &after[len + 1..];
            }
            None => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of the identifier at the start of `s`, or `None` when `s` does
/// not open with a letter.
fn leading_identifier_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    Some(
        bytes
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(keys: &[&str]) -> HashMap<String, Vec<String>> {
        keys.iter()
            .map(|k| (k.to_string(), vec!["value".to_string()]))
            .collect()
    }

    fn sorted_fields(keys: &[&str]) -> Vec<String> {
        let mut fields = form_dirty_fields(&form(keys));
        fields.sort();
        fields
    }

    #[test]
    fn map_reference_is_rewritten() {
        assert_eq!(sorted_fields(&["meta[color]"]), vec!["meta(color)"]);
    }

    #[test]
    fn plain_keys_pass_through() {
        assert_eq!(sorted_fields(&["text", "child.text"]), vec!["child.text", "text"]);
    }

    #[test]
    fn numeric_index_is_not_a_map_reference() {
        assert_eq!(sorted_fields(&["arr[0]"]), vec!["arr[0]"]);
    }

    #[test]
    fn multiple_groups_in_one_key() {
        assert_eq!(sorted_fields(&["a[b][c]"]), vec!["a(b)(c)"]);
    }

    #[test]
    fn malformed_groups_pass_through() {
        assert_eq!(sorted_fields(&["a[b"]), vec!["a[b"]);
        assert_eq!(sorted_fields(&["a[]"]), vec!["a[]"]);
        assert_eq!(sorted_fields(&["a[9lives]"]), vec!["a[9lives]"]);
    }

    #[test]
    fn rewrite_resumes_after_a_non_match() {
        assert_eq!(sorted_fields(&["a[b[c]"]), vec!["a[b(c)"]);
    }

    #[test]
    fn one_path_per_key() {
        let fields = form_dirty_fields(&form(&["text", "meta[color]", "meta[size]"]));
        assert_eq!(fields.len(), 3);
    }
}
