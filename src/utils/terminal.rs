//! Sanitizing record text for terminal output.
//!
//! Descriptions, names, and references come from data files and may contain escape
//! sequences. Anything printed by the CLI or drawn by the TUI goes through
//! [`strip_ansi_codes`] or [`sanitize_cell`] first.

/// Strip ANSI escape sequences and control characters.
///
/// Removes CSI sequences (`ESC [ ... letter`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`), and control characters other than tab, newline, and
/// carriage return.
///
/// ```
/// use delivery_desk::utils::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mPad Thai\x1b[0m"), "Pad Thai");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == '\x07' {
                            break;
                        }
                        if next_ch == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Single-line, width-limited form of `text` for table cells and list rows.
///
/// Escapes are stripped, whitespace runs (including newlines) collapse to one
/// space, and text longer than `max_chars` is cut with a trailing `…`.
pub fn sanitize_cell(text: &str, max_chars: usize) -> String {
    let clean = strip_ansi_codes(text);
    let collapsed = clean.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut truncated: String = collapsed.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}
