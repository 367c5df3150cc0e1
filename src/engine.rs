// engine.rs - Hand-off to the host regex engine.
//
// Rendered pattern text is compiled with fancy-regex, which understands
// lookaround, backreferences and the `(?P<name>...)` / `(?P=name)` forms.

use fancy_regex::Regex;

use crate::error::ExpressionError;
use crate::flags::Flags;

/// Flags with an inline letter in fancy-regex. `a` and `u` have no inline
/// form there; `GLOBAL` and `STICKY` have no letter anywhere.
const ENGINE_FLAGS: Flags = Flags::CASE_INSENSITIVE
    .union(Flags::MULTILINE)
    .union(Flags::DOT_MATCHES_NEWLINE);

/// The inline flag group fancy-regex accepts for `flags`.
pub fn engine_flag_block(flags: Flags) -> String {
    flags.intersection(ENGINE_FLAGS).block()
}

/// Compile `pattern` under `flags`.
pub fn compile(pattern: &str, flags: Flags) -> Result<Regex, ExpressionError> {
    let source = format!("{}{}", engine_flag_block(flags), pattern);
    Regex::new(&source).map_err(|err| ExpressionError::Engine {
        message: err.to_string(),
    })
}
