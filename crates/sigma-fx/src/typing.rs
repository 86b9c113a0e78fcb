//! Typing-reveal effect for titles and flavor text.

/// Reveals a string one character at a time.
#[derive(Debug, Clone)]
pub struct TypingReveal {
    text: String,
    chars_per_sec: f32,
    elapsed_ms: u32,
}

impl TypingReveal {
    pub fn new(text: impl Into<String>, chars_per_sec: f32) -> Self {
        Self {
            text: text.into(),
            chars_per_sec: chars_per_sec.max(0.1),
            elapsed_ms: 0,
        }
    }

    /// Advance the reveal. Saturates once the full text is visible.
    pub fn advance(&mut self, dt_ms: u32) {
        if !self.is_complete() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        }
    }

    fn visible_chars(&self) -> usize {
        let n = (self.elapsed_ms as f32 / 1000.0 * self.chars_per_sec) as usize;
        n.min(self.text.chars().count())
    }

    /// The currently revealed prefix (always on a char boundary).
    pub fn visible(&self) -> &str {
        let n = self.visible_chars();
        match self.text.char_indices().nth(n) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.visible_chars() == self.text.chars().count()
    }

    /// Reveal everything immediately.
    pub fn finish(&mut self) {
        self.elapsed_ms = u32::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_incrementally() {
        let mut t = TypingReveal::new("SIGMA", 10.0);
        assert_eq!(t.visible(), "");
        t.advance(100);
        assert_eq!(t.visible(), "S");
        t.advance(200);
        assert_eq!(t.visible(), "SIG");
    }

    #[test]
    fn reveal_is_monotonic_and_saturates() {
        let mut t = TypingReveal::new("SIGMA", 10.0);
        let mut last = 0;
        for _ in 0..100 {
            t.advance(17);
            assert!(t.visible().len() >= last);
            last = t.visible().len();
        }
        assert!(t.is_complete());
        assert_eq!(t.visible(), "SIGMA");
    }

    #[test]
    fn finish_reveals_all() {
        let mut t = TypingReveal::new("AI Hacker Protocol", 1.0);
        t.finish();
        assert_eq!(t.visible(), "AI Hacker Protocol");
    }

    #[test]
    fn multibyte_text_stays_on_char_boundaries() {
        let mut t = TypingReveal::new("Σ-προτόκολλο", 10.0);
        for _ in 0..40 {
            t.advance(50);
            let _ = t.visible(); // must not panic on a split char
        }
        assert_eq!(t.visible(), "Σ-προτόκολλο");
    }

    #[test]
    fn empty_text_is_complete_immediately() {
        let t = TypingReveal::new("", 5.0);
        assert!(t.is_complete());
        assert_eq!(t.visible(), "");
    }
}
