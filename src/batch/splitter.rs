//! Statement splitting for multi-statement SQL text.
//!
//! A single left-to-right scan with a quote-state machine. This is a
//! lexical splitter, not a SQL parser: it knows just enough about `'` and
//! `"` literals to avoid cutting a statement inside one.

/// Splits raw SQL text into individual statements on unquoted semicolons.
///
/// Statements keep their surrounding whitespace; trimming is the caller's
/// responsibility. A semicolon inside a quoted literal is literal text. A
/// doubled quote character inside a literal (`''` or `""`) is SQL's escaped
/// quote and does not close the literal. Comment regions are not
/// recognized; a semicolon inside `--` or `/* */` still splits.
pub fn split_statements(text: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote_char: Option<char> = None;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match quote_char {
            None => {
                if ch == ';' {
                    statements.push(std::mem::take(&mut current));
                    continue;
                }
                if ch == '\'' || ch == '"' {
                    quote_char = Some(ch);
                }
                current.push(ch);
            }
            Some(q) => {
                if ch == q {
                    if let Some(&next) = chars.peek() {
                        if next == q {
                            // Escaped quote: consume the pair, stay in the literal.
                            current.push(ch);
                            current.push(next);
                            chars.next();
                            continue;
                        }
                    }
                    quote_char = None;
                }
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        statements.push(current);
    }

    statements
}
