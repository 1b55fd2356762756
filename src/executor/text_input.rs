// Text → discrete key events. Control characters other than newline and tab
// have no key equivalent and are dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStroke {
    Char(char),
    Return,
    Tab,
}

/// One key event per character. `\r\n` collapses to a single Return.
pub fn key_sequence(text: &str) -> Vec<KeyStroke> {
    let mut keys = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                keys.push(KeyStroke::Return);
            }
            '\n' => keys.push(KeyStroke::Return),
            '\t' => keys.push(KeyStroke::Tab),
            c if c.is_control() => {}
            c => keys.push(KeyStroke::Char(c)),
        }
    }
    keys
}
