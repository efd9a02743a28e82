//! Canonical-template assembly.

/// Re-assemble significant characters into a rule's canonical template.
///
/// `N` consumes the next character and requires a digit, `A` consumes the
/// next character and uppercases a letter, anything else is emitted
/// literally. Returns `None` when the characters do not fit the template
/// exactly (wrong count or wrong class), in which case the caller keeps
/// its cleaned value and lets validation judge it.
pub fn apply_template(template: &str, significant: &str) -> Option<String> {
    let mut chars = significant.chars();
    let mut out = String::with_capacity(template.len());
    for slot in template.chars() {
        match slot {
            'N' => {
                let ch = chars.next()?;
                if !ch.is_ascii_digit() {
                    return None;
                }
                out.push(ch);
            }
            'A' => {
                let ch = chars.next()?;
                if !ch.is_alphabetic() {
                    return None;
                }
                out.extend(ch.to_uppercase());
            }
            literal => out.push(literal),
        }
    }
    if chars.next().is_some() {
        return None;
    }
    Some(out)
}
