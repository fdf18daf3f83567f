use crate::types::NameMap;

/// Rewrites script-name references in an expression through the rename
/// table.
///
/// The text is scanned left to right exactly once: at each position the
/// remap keys are tried longest first (ties broken lexicographically), a
/// match emits the replacement and the scan resumes after the matched key.
/// Replacement output is never rescanned, so chained entries in the table
/// (`A` to `B` together with `B` to `C`) cannot cascade within one call.
/// Matching is plain substring comparison; the expression language's own
/// token structure plays no role here.
pub fn rewrite_expression(expression: &str, name_map: &NameMap) -> String {
    if name_map.is_empty() {
        return expression.to_string();
    }

    let mut keys: Vec<&str> = name_map.keys().map(String::as_str).collect();
    keys.retain(|k| !k.is_empty());
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut out = String::with_capacity(expression.len());
    let mut rest = expression;
    while let Some(first) = rest.chars().next() {
        match keys.iter().find(|key| rest.starts_with(*key)) {
            Some(key) => {
                out.push_str(&name_map[*key]);
                rest = &rest[key.len()..];
            }
            None => {
                out.push(first);
                rest = &rest[first.len_utf8()..];
            }
        }
    }
    out
}
