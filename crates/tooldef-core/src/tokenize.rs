//! Splitting long flag strings into sorted tokens for multi-line output.

/// Values longer than this are tokenized when pretty output is on.
pub const DEFAULT_PRETTY_THRESHOLD: usize = 50;

/// Whether `token` starts a new option (`-flag` or `/flag`).
fn is_option(token: &str) -> bool {
    token.starts_with('-') || token.starts_with('/')
}

/// Split `value` into whitespace-normalized, lexicographically sorted tokens.
///
/// A word that does not look like an option is taken as the argument of the
/// word before it and kept in the same entry (`-include AutoGen.h`). Only one
/// word of lookahead is merged.
pub fn tokenize_flags(value: &str) -> Vec<String> {
    let words: Vec<&str> = value.split_whitespace().collect();
    let mut tokens = Vec::with_capacity(words.len());

    let mut i = 0;
    while i < words.len() {
        match words.get(i + 1) {
            Some(next) if !is_option(next) => {
                tokens.push(format!("{} {}", words[i], next));
                i += 2;
            }
            _ => {
                tokens.push(words[i].to_string());
                i += 1;
            }
        }
    }

    tokens.sort();
    tokens
}
