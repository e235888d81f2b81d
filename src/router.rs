//! Routing of the unsafe-argument diagnostic
//!
//! The routing decision is a plain value, kept separate from the machinery
//! that writes it, so the decision table can be tested without I/O.

use crate::classifier::Classification;

/// Header line emitted above the flagged arguments. Consumers detect this
/// diagnostic by matching the line verbatim.
pub const UNSAFE_ARGUMENTS_WARNING_HEADER: &str =
    "This build uses unsafe internal compiler arguments";

/// Output channel for a routed diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// The invocation's standard output
    Informational,
    /// The invocation's error output
    Error,
}

/// A diagnostic to be written: the fixed header plus one line per flagged
/// argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stream: Stream,
    pub header: &'static str,
    /// Flagged arguments, each rendered verbatim as its own line
    pub arguments: Vec<String>,
    /// Marks the invocation failed regardless of the compiler's own result.
    /// Independent of `stream`: a policy may fail without the error channel.
    pub causes_failure: bool,
}

impl Diagnostic {
    /// Output lines: the header first, then each argument verbatim
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.header).chain(self.arguments.iter().map(String::as_str))
    }
}

/// Decide whether and where to surface the unsafe-argument warning
///
/// Returns `None` when nothing was flagged; safe arguments alone never
/// produce output. Otherwise the diagnostic carries every flagged argument:
/// on the informational stream without failing the invocation, or, when
/// warnings are treated as errors, on the error stream with
/// `causes_failure` set.
pub fn route(classification: &Classification, warnings_as_errors: bool) -> Option<Diagnostic> {
    if classification.flagged.is_empty() {
        return None;
    }

    let (stream, causes_failure) = if warnings_as_errors {
        (Stream::Error, true)
    } else {
        (Stream::Informational, false)
    };

    Some(Diagnostic {
        stream,
        header: UNSAFE_ARGUMENTS_WARNING_HEADER,
        arguments: classification.flagged.clone(),
        causes_failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::Allowlist;
    use crate::classifier::classify;

    const KNOWN: &str = "-XXLanguage:+DisableCompatibilityModeForNewInference";
    const UNKNOWN: &str = "-XXLanguage:+FunctionReferenceWithDefaultValueAsOtherType";

    fn classification_of(args: &[&str]) -> Classification {
        classify(args.iter().copied(), &Allowlist::from_arguments([KNOWN]))
    }

    #[test]
    fn test_route_empty_arguments_is_silent() {
        assert_eq!(route(&classification_of(&[]), false), None);
        assert_eq!(route(&classification_of(&[]), true), None);
    }

    #[test]
    fn test_route_safe_arguments_are_silent() {
        assert_eq!(route(&classification_of(&[KNOWN]), false), None);
        // Escalation never invents a diagnostic for a clean argument set
        assert_eq!(route(&classification_of(&[KNOWN]), true), None);
    }

    #[test]
    fn test_route_flagged_argument_warns_on_informational_stream() {
        let diagnostic = route(&classification_of(&[UNKNOWN]), false).unwrap();
        assert_eq!(diagnostic.stream, Stream::Informational);
        assert_eq!(diagnostic.header, UNSAFE_ARGUMENTS_WARNING_HEADER);
        assert_eq!(diagnostic.arguments, vec![UNKNOWN]);
        assert!(!diagnostic.causes_failure);
    }

    #[test]
    fn test_route_flagged_argument_escalates_with_warnings_as_errors() {
        let diagnostic = route(&classification_of(&[UNKNOWN]), true).unwrap();
        assert_eq!(diagnostic.stream, Stream::Error);
        assert_eq!(diagnostic.header, UNSAFE_ARGUMENTS_WARNING_HEADER);
        assert_eq!(diagnostic.arguments, vec![UNKNOWN]);
        assert!(diagnostic.causes_failure);
    }

    #[test]
    fn test_route_lists_only_flagged_arguments() {
        let diagnostic = route(&classification_of(&[KNOWN, UNKNOWN]), false).unwrap();
        assert_eq!(diagnostic.arguments, vec![UNKNOWN]);
    }

    #[test]
    fn test_diagnostic_lines_render_header_then_arguments() {
        let diagnostic = route(&classification_of(&["-Xfirst", "-Xsecond"]), false).unwrap();
        let lines: Vec<&str> = diagnostic.lines().collect();
        assert_eq!(
            lines,
            vec![UNSAFE_ARGUMENTS_WARNING_HEADER, "-Xfirst", "-Xsecond"]
        );
    }

    #[test]
    fn test_header_is_a_single_line() {
        assert!(!UNSAFE_ARGUMENTS_WARNING_HEADER.contains('\n'));
    }
}
