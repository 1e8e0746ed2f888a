/// Strip control and escape characters from untrusted text before it reaches
/// the presentation surface.
///
/// Queries come from user input and answers from the relay; on a terminal
/// the injection vector is control sequences (ESC, CSI, raw carriage
/// returns), so those are removed while printable text — including things
/// like `<script>` — passes through as literal characters. Newlines and tabs
/// survive; tabs become spaces so column math stays honest.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_stays_literal() {
        let stored = "<script>alert('x')</script>";
        assert_eq!(sanitize_text(stored), stored);
    }

    #[test]
    fn escape_sequences_are_stripped() {
        assert_eq!(sanitize_text("red\x1b[31mtext"), "redtext");
        assert_eq!(sanitize_text("bell\x07"), "bell");
    }

    #[test]
    fn newlines_survive_tabs_flatten() {
        assert_eq!(sanitize_text("a\nb\tc"), "a\nb c");
    }

    #[test]
    fn carriage_returns_are_dropped() {
        assert_eq!(sanitize_text("line\r\nnext"), "line\nnext");
    }
}
