// SPDX-License-Identifier: PMPL-1.0-or-later

//! `{name}` placeholder substitution for resolved strings.

/// Replaces `{name}` tokens in `template` with matching argument values.
///
/// Single pass: substituted values are never re-scanned, so a value that
/// itself contains `{name}` is emitted literally. Tokens without a matching
/// argument, and unbalanced braces, are left untouched.
///
/// ```
/// use mies_i18n::resolve::interpolate;
/// assert_eq!(interpolate("Hi {name}!", &[("name", "Ada")]), "Hi Ada!");
/// assert_eq!(interpolate("Hi {who}", &[]), "Hi {who}");
/// ```
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(arg, _)| *arg == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
