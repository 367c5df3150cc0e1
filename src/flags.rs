// flags.rs - Mode flags and their inline flag-block rendering.

use bitflags::bitflags;

bitflags! {
    /// Mode flags declared on an expression.
    ///
    /// `GLOBAL` and `STICKY` are accepted for callers coming from engines that
    /// have them, but the target syntax has no letter for either.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        const ASCII = 1 << 0;
        const CASE_INSENSITIVE = 1 << 1;
        const MULTILINE = 1 << 2;
        const DOT_MATCHES_NEWLINE = 1 << 3;
        const UNICODE = 1 << 4;
        const GLOBAL = 1 << 5;
        const STICKY = 1 << 6;
    }
}

const LETTERS: [(Flags, char); 5] = [
    (Flags::ASCII, 'a'),
    (Flags::CASE_INSENSITIVE, 'i'),
    (Flags::MULTILINE, 'm'),
    (Flags::DOT_MATCHES_NEWLINE, 's'),
    (Flags::UNICODE, 'u'),
];

impl Flags {
    /// Inline letter for a single flag, or `None` if the syntax has none.
    pub fn letter(self) -> Option<char> {
        LETTERS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, letter)| *letter)
    }

    /// Letters of all set flags, sorted ascending.
    ///
    /// ```
    /// use expressive::flags::Flags;
    ///
    /// let flags = Flags::DOT_MATCHES_NEWLINE | Flags::CASE_INSENSITIVE | Flags::ASCII;
    /// assert_eq!(flags.letters(), "ais");
    /// assert_eq!((Flags::GLOBAL | Flags::STICKY).letters(), "");
    /// ```
    pub fn letters(self) -> String {
        let mut letters: Vec<char> = LETTERS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, letter)| *letter)
            .collect();
        letters.sort_unstable();
        letters.into_iter().collect()
    }

    /// The `(?...)` prefix for these flags, empty if no letter applies.
    pub fn block(self) -> String {
        let letters = self.letters();
        if letters.is_empty() {
            letters
        } else {
            format!("(?{letters})")
        }
    }
}
