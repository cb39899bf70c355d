//! Raw-line classification into directives and command records.

/// Marker character that distinguishes directive lines from command records.
pub const DIRECTIVE_MARKER: char = '%';

const EVENT_PREFIX: &str = "%EVENT";
const WAIT_GENERATOR_PREFIX: &str = "%WAIT_GEN";
const WAIT_CHECKER_PREFIX: &str = "%WAIT_CHK";

/// A synchronization or event-signaling directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Directive {
    /// Pulse the outgoing event signal for one cycle.
    Event,
    /// Stall until the generator peer's event input is observed true.
    WaitForGenerator,
    /// Stall until the checker peer's event input is observed true.
    WaitForChecker,
}

/// Routing decision for one raw script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// A recognized directive selected by exact prefix match.
    Directive(Directive),
    /// A marker-prefixed line matching no known directive; consumed and
    /// discarded without effect.
    UnknownDirective,
    /// A fixed-width command record for the transaction decoder.
    Command,
}

/// Classifies a raw line by its leading marker and directive prefix.
///
/// Marker-prefixed lines select a [`Directive`] by exact prefix; anything
/// else after the marker is discarded permissively. Lines without the marker
/// are command records.
#[must_use]
pub fn classify_line(text: &str) -> LineClass {
    if !text.starts_with(DIRECTIVE_MARKER) {
        return LineClass::Command;
    }
    if text.starts_with(EVENT_PREFIX) {
        LineClass::Directive(Directive::Event)
    } else if text.starts_with(WAIT_GENERATOR_PREFIX) {
        LineClass::Directive(Directive::WaitForGenerator)
    } else if text.starts_with(WAIT_CHECKER_PREFIX) {
        LineClass::Directive(Directive::WaitForChecker)
    } else {
        LineClass::UnknownDirective
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_line, Directive, LineClass};

    #[test]
    fn known_directives_match_by_prefix() {
        assert_eq!(
            classify_line("%EVENT"),
            LineClass::Directive(Directive::Event)
        );
        assert_eq!(
            classify_line("%WAIT_GEN"),
            LineClass::Directive(Directive::WaitForGenerator)
        );
        assert_eq!(
            classify_line("%WAIT_CHK"),
            LineClass::Directive(Directive::WaitForChecker)
        );
    }

    #[test]
    fn trailing_text_after_directive_prefix_is_accepted() {
        assert_eq!(
            classify_line("%EVENT fired after warm-up"),
            LineClass::Directive(Directive::Event)
        );
        assert_eq!(
            classify_line("%WAIT_GENERATOR"),
            LineClass::Directive(Directive::WaitForGenerator)
        );
    }

    #[test]
    fn unknown_marker_lines_are_discarded_not_commands() {
        assert_eq!(classify_line("%"), LineClass::UnknownDirective);
        assert_eq!(classify_line("%NOP"), LineClass::UnknownDirective);
        assert_eq!(classify_line("%WAIT"), LineClass::UnknownDirective);
        assert_eq!(classify_line("%event"), LineClass::UnknownDirective);
    }

    #[test]
    fn unmarked_lines_are_commands() {
        assert_eq!(
            classify_line("write 00000010 DEADBEEF"),
            LineClass::Command
        );
        assert_eq!(classify_line("anything else"), LineClass::Command);
    }
}
