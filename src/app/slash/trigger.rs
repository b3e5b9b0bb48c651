use tui_textarea::{CursorMove, TextArea};

/// An active slash trigger: the `/` position on the cursor line and the
/// query typed after it. Columns are character indices, matching
/// `TextArea::cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub row: usize,
    pub slash_col: usize,
    pub query: String,
}

/// Scan backwards from the cursor for a `/` at line start or after
/// whitespace, with no whitespace between it and the cursor. Returns `None`
/// when the caret is not in a trigger context.
#[must_use]
pub fn detect(lines: &[String], cursor: (usize, usize)) -> Option<Trigger> {
    let (row, col) = cursor;
    let line = lines.get(row)?;
    let chars: Vec<char> = line.chars().collect();
    let col = col.min(chars.len());

    let mut i = col;
    while i > 0 {
        let ch = chars[i - 1];
        if ch == '/' {
            let preceded_ok = i == 1 || chars[i - 2].is_whitespace();
            if !preceded_ok {
                return None;
            }
            return Some(Trigger {
                row,
                slash_col: i - 1,
                query: chars[i..col].iter().collect(),
            });
        }
        if ch.is_whitespace() {
            return None;
        }
        i -= 1;
    }
    None
}

/// Replace the trigger text (`/` plus the query) with `replacement`,
/// leaving the cursor at the end of the inserted text. This is the single
/// document-mutation primitive the palette uses: block insertion clears the
/// trigger, inline insertion replaces it, and menu descent re-inserts a new
/// prefix through it.
pub fn replace(textarea: &mut TextArea<'_>, trigger: &Trigger, replacement: &str) {
    let span = 1 + trigger.query.chars().count();
    textarea.move_cursor(CursorMove::Jump(
        trigger.row as u16,
        trigger.slash_col as u16,
    ));
    textarea.delete_str(span);
    if !replacement.is_empty() {
        textarea.insert_str(replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &[&str]) -> Vec<String> {
        s.iter().map(|l| (*l).to_string()).collect()
    }

    #[test]
    fn detects_trigger_at_line_start() {
        let t = detect(&lines(&["/hea"]), (0, 4)).unwrap();
        assert_eq!(t.slash_col, 0);
        assert_eq!(t.query, "hea");
    }

    #[test]
    fn detects_trigger_after_whitespace() {
        let t = detect(&lines(&["hello /but"]), (0, 10)).unwrap();
        assert_eq!(t.slash_col, 6);
        assert_eq!(t.query, "but");
    }

    #[test]
    fn empty_query_right_after_slash() {
        let t = detect(&lines(&["/"]), (0, 1)).unwrap();
        assert_eq!(t.query, "");
    }

    #[test]
    fn no_trigger_mid_word() {
        // A slash inside a word (like a URL) is content, not a trigger.
        assert_eq!(detect(&lines(&["https/x"]), (0, 7)), None);
        assert_eq!(detect(&lines(&["a/b"]), (0, 3)), None);
    }

    #[test]
    fn whitespace_between_slash_and_cursor_ends_the_trigger() {
        assert_eq!(detect(&lines(&["/head line"]), (0, 10)), None);
    }

    #[test]
    fn cursor_before_the_slash_is_no_trigger() {
        assert_eq!(detect(&lines(&["/head"]), (0, 0)), None);
    }

    #[test]
    fn handles_multibyte_content() {
        let t = detect(&lines(&["héllo /qué"]), (0, 10)).unwrap();
        assert_eq!(t.slash_col, 6);
        assert_eq!(t.query, "qué");
    }

    #[test]
    fn out_of_range_cursor_is_tolerated() {
        assert_eq!(detect(&lines(&["ab"]), (5, 0)), None);
        // Column past the end clamps instead of panicking.
        let t = detect(&lines(&["/q"]), (0, 99)).unwrap();
        assert_eq!(t.query, "q");
    }

    #[test]
    fn replace_swaps_trigger_for_text() {
        let mut textarea = TextArea::new(vec!["intro /vari".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 11));
        let trigger = detect(textarea.lines(), textarea.cursor()).unwrap();

        replace(&mut textarea, &trigger, "{{user.name}}");
        assert_eq!(textarea.lines(), ["intro {{user.name}}"]);

        // The new cursor position sits right after the replacement.
        assert_eq!(textarea.cursor(), (0, 19));
    }

    #[test]
    fn replace_with_empty_removes_trigger() {
        let mut textarea = TextArea::new(vec!["/button".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 7));
        let trigger = detect(textarea.lines(), textarea.cursor()).unwrap();

        replace(&mut textarea, &trigger, "");
        assert_eq!(textarea.lines(), [""]);
    }

    #[test]
    fn replace_then_detect_re_enters_namespace() {
        // Menu descent at the text layer: the inserted prefix is itself a
        // fresh trigger whose query carries the namespace.
        let mut textarea = TextArea::new(vec!["/vari".to_string()]);
        textarea.move_cursor(CursorMove::Jump(0, 5));
        let trigger = detect(textarea.lines(), textarea.cursor()).unwrap();

        replace(&mut textarea, &trigger, "/variable.");
        let again = detect(textarea.lines(), textarea.cursor()).unwrap();
        assert_eq!(again.query, "variable.");
    }
}
