//! The selection boundary: mapping a user's menu choice to a flow.
//!
//! This is the only place parse failures are recovered. Every fallback lands
//! on the library's default flow (vortex), logs a warning, and is recorded
//! on the returned [`SelectedFlow`] so callers can report it.

use std::fmt;
use std::sync::Arc;

use flowlines_core::NamedField;
use flowlines_expr::{FieldCompiler, ParseError};
use flowlines_fields::FieldLibrary;
use tracing::{info, warn};

/// Menu key for a user-defined flow.
pub const CUSTOM_KEY: &str = "5";
/// Menu label for a user-defined flow.
pub const CUSTOM_MENU_LABEL: &str = "Custom Flow (user-defined)";
/// Display name given to a compiled user-defined flow.
pub const CUSTOM_FLOW_NAME: &str = "Custom Flow";

/// The two formula strings for a custom flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomFormulas {
    /// Formula for u(x, y).
    pub u: String,
    /// Formula for v(x, y).
    pub v: String,
}

impl CustomFormulas {
    /// Pair two formulas, trimming surrounding whitespace.
    pub fn new(u: impl AsRef<str>, v: impl AsRef<str>) -> Self {
        Self {
            u: u.as_ref().trim().to_string(),
            v: v.as_ref().trim().to_string(),
        }
    }
}

/// Why a selection fell back to the default flow.
#[derive(Clone, Debug, PartialEq)]
pub enum Fallback {
    /// The choice matched no menu key.
    InvalidChoice {
        /// The choice as given.
        choice: String,
    },
    /// The custom formulas failed to compile.
    CompileFailed(ParseError),
    /// The custom key was chosen without formulas.
    MissingFormulas,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChoice { choice } => write!(f, "invalid choice {choice:?}"),
            Self::CompileFailed(e) => write!(f, "could not compile custom flow: {e}"),
            Self::MissingFormulas => write!(f, "custom flow chosen without formulas"),
        }
    }
}

/// The outcome of a selection.
#[derive(Clone, Debug)]
pub struct SelectedFlow {
    /// The flow to visualize.
    pub flow: NamedField,
    /// Set when the requested flow could not be used.
    pub fallback: Option<Fallback>,
}

impl SelectedFlow {
    /// Returns `true` if the selection fell back to the default flow.
    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Resolves menu choices against a [`FieldLibrary`], compiling custom flows
/// with a [`FieldCompiler`].
#[derive(Clone, Debug, Default)]
pub struct FlowSelector {
    library: FieldLibrary,
    compiler: FieldCompiler,
}

impl FlowSelector {
    /// A selector over the given library.
    pub fn new(library: FieldLibrary) -> Self {
        Self {
            library,
            compiler: FieldCompiler::new(),
        }
    }

    /// The underlying library.
    pub fn library(&self) -> &FieldLibrary {
        &self.library
    }

    /// Menu entries in order, `(key, label)`, ending with the custom entry.
    pub fn menu(&self) -> Vec<(&'static str, &'static str)> {
        self.library
            .iter()
            .map(|(key, entry)| (key, entry.name))
            .chain(std::iter::once((CUSTOM_KEY, CUSTOM_MENU_LABEL)))
            .collect()
    }

    /// Resolve `choice` (surrounding whitespace ignored).
    ///
    /// Never fails: an unknown key, missing formulas, or formulas that do
    /// not compile all yield the default flow with [`SelectedFlow::fallback`]
    /// set.
    pub fn select(&self, choice: &str, formulas: Option<&CustomFormulas>) -> SelectedFlow {
        let choice = choice.trim();
        if choice == CUSTOM_KEY {
            return self.select_custom(formulas);
        }
        match self.library.get(choice) {
            Some(entry) => SelectedFlow {
                flow: entry.to_named(),
                fallback: None,
            },
            None => {
                let default = self.library.default_entry();
                warn!(choice, fallback = default.name, "invalid flow choice");
                self.fallback(Fallback::InvalidChoice {
                    choice: choice.to_string(),
                })
            }
        }
    }

    fn select_custom(&self, formulas: Option<&CustomFormulas>) -> SelectedFlow {
        let Some(formulas) = formulas else {
            warn!(
                fallback = self.library.default_entry().name,
                "custom flow chosen without formulas"
            );
            return self.fallback(Fallback::MissingFormulas);
        };
        match self.compiler.compile(&formulas.u, &formulas.v) {
            Ok(field) => {
                info!(u = %formulas.u, v = %formulas.v, "custom flow compiled");
                SelectedFlow {
                    flow: NamedField::new(CUSTOM_FLOW_NAME, Arc::new(field)),
                    fallback: None,
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = self.library.default_entry().name,
                    "could not compile custom flow"
                );
                self.fallback(Fallback::CompileFailed(e))
            }
        }
    }

    fn fallback(&self, reason: Fallback) -> SelectedFlow {
        SelectedFlow {
            flow: self.library.default_entry().to_named(),
            fallback: Some(reason),
        }
    }
}

/// Resolve a choice against the standard library.
///
/// ```
/// use flowlines::selection::{select_flow, CustomFormulas, Fallback};
///
/// let picked = select_flow("3", None);
/// assert_eq!(picked.flow.name(), "Source Flow");
///
/// let custom = select_flow("5", Some(&CustomFormulas::new("-y", "x")));
/// assert_eq!(custom.flow.name(), "Custom Flow");
///
/// let bad = select_flow("5", Some(&CustomFormulas::new("(x", "y")));
/// assert_eq!(bad.flow.name(), "Vortex Flow");
/// assert!(matches!(bad.fallback, Some(Fallback::CompileFailed(_))));
/// ```
pub fn select_flow(choice: &str, formulas: Option<&CustomFormulas>) -> SelectedFlow {
    FlowSelector::default().select(choice, formulas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowlines_core::{Vec2, VelocityField};
    use flowlines_expr::{Component, SyntaxError};

    #[test]
    fn library_keys_select_library_flows() {
        let names: Vec<String> = ["1", "2", "3", "4"]
            .iter()
            .map(|k| select_flow(k, None).flow.name().to_string())
            .collect();
        assert_eq!(
            names,
            ["Vortex Flow", "Uniform Flow", "Source Flow", "Doublet Flow"]
        );
    }

    #[test]
    fn choice_is_trimmed() {
        let s = select_flow("  2\n", None);
        assert_eq!(s.flow.name(), "Uniform Flow");
        assert!(!s.fell_back());
    }

    #[test]
    fn invalid_choice_falls_back_to_vortex() {
        for choice in ["", "0", "6", "vortex"] {
            let s = select_flow(choice, None);
            assert_eq!(s.flow.name(), "Vortex Flow");
            assert_eq!(
                s.fallback,
                Some(Fallback::InvalidChoice {
                    choice: choice.to_string()
                })
            );
        }
    }

    #[test]
    fn custom_flow_compiles() {
        let s = select_flow("5", Some(&CustomFormulas::new(" x*y ", "1")));
        assert!(!s.fell_back());
        assert_eq!(s.flow.name(), CUSTOM_FLOW_NAME);
        assert_eq!(
            s.flow.field().velocity(Vec2::new(2.0, 3.0)),
            Vec2::new(6.0, 1.0)
        );
    }

    #[test]
    fn custom_compile_failure_carries_cause() {
        let s = select_flow("5", Some(&CustomFormulas::new("x", "sin(")));
        assert_eq!(s.flow.name(), "Vortex Flow");
        match s.fallback {
            Some(Fallback::CompileFailed(e)) => {
                assert_eq!(e.component, Component::V);
                assert_eq!(e.cause, SyntaxError::UnexpectedEnd);
            }
            other => panic!("expected CompileFailed, got {other:?}"),
        }
    }

    #[test]
    fn custom_without_formulas_falls_back() {
        let s = select_flow("5", None);
        assert_eq!(s.flow.name(), "Vortex Flow");
        assert_eq!(s.fallback, Some(Fallback::MissingFormulas));
    }

    #[test]
    fn menu_lists_custom_entry_last() {
        let menu = FlowSelector::default().menu();
        assert_eq!(menu.len(), 5);
        assert_eq!(menu[0], ("1", "Vortex Flow"));
        assert_eq!(menu[4], ("5", "Custom Flow (user-defined)"));
    }
}
