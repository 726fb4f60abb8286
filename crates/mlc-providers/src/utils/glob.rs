//! Redis-style glob matching
//!
//! Mirrors the `MATCH` semantics of `SCAN`/`KEYS` so that in-process stores
//! return the same key sets as a Redis server would:
//!
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]` and `[^abc]` match character classes
//! - `\x` matches `x` literally

/// Match `text` against a Redis glob
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    // Position after the last `*` and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() {
            match pattern[p] {
                '*' => {
                    backtrack = Some((p + 1, t));
                    p += 1;
                    continue;
                }
                '?' => {
                    p += 1;
                    t += 1;
                    continue;
                }
                '[' => {
                    if let Some((matched, next)) = match_class(&pattern, p, text[t]) {
                        if matched {
                            p = next;
                            t += 1;
                            continue;
                        }
                    } else if text[t] == '[' {
                        // Unterminated class is a literal bracket
                        p += 1;
                        t += 1;
                        continue;
                    }
                }
                '\\' if p + 1 < pattern.len() => {
                    if pattern[p + 1] == text[t] {
                        p += 2;
                        t += 1;
                        continue;
                    }
                }
                c => {
                    if c == text[t] {
                        p += 1;
                        t += 1;
                        continue;
                    }
                }
            }
        }

        match backtrack {
            Some((star_p, star_t)) => {
                p = star_p;
                t = star_t + 1;
                backtrack = Some((star_p, star_t + 1));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Evaluate the class starting at `pattern[start] == '['`
///
/// Returns whether `c` is in the class and the index after the closing `]`,
/// or `None` when the class is never closed.
fn match_class(pattern: &[char], start: usize, c: char) -> Option<(bool, usize)> {
    let mut i = start + 1;
    let negated = pattern.get(i) == Some(&'^');
    if negated {
        i += 1;
    }

    let mut matched = false;
    let mut first = true;
    while i < pattern.len() {
        let current = pattern[i];
        if current == ']' && !first {
            return Some((matched != negated, i + 1));
        }
        first = false;

        let (low, consumed) = if current == '\\' && i + 1 < pattern.len() {
            (pattern[i + 1], 2)
        } else {
            (current, 1)
        };
        i += consumed;

        if pattern.get(i) == Some(&'-') && pattern.get(i + 1).is_some_and(|&n| n != ']') {
            let high = pattern[i + 1];
            i += 2;
            let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
            if (lo..=hi).contains(&c) {
                matched = true;
            }
        } else if low == c {
            matched = true;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::glob_match;

    #[test]
    fn star_spans_delimiters() {
        assert!(glob_match("tasks:42:*", "tasks:42:page:1"));
        assert!(glob_match("tasks:*:page", "tasks:42:page"));
        assert!(!glob_match("tasks:42:*", "tasks:99:page:1"));
        assert!(glob_match("*", ""));
    }

    #[test]
    fn question_mark_and_classes() {
        assert!(glob_match("user:?", "user:7"));
        assert!(!glob_match("user:?", "user:77"));
        assert!(glob_match("user:[0-9]", "user:5"));
        assert!(!glob_match("user:[^0-9]", "user:5"));
        assert!(glob_match("user:[ab]x", "user:bx"));
    }

    #[test]
    fn escapes_are_literal() {
        assert!(glob_match(r"key\*", "key*"));
        assert!(!glob_match(r"key\*", "keyX"));
        assert!(glob_match(r"a\[1\]", "a[1]"));
    }
}
