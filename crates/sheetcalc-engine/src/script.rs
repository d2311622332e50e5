//! Script hosts for `@` function escapes.
//!
//! The evaluator treats a host as a black box: it hands over the escaped
//! source text and returns whatever string comes back. [`RhaiHost`] is the
//! stock implementation. It keeps one [`Scope`] for its whole lifetime, so a
//! variable bound by one escape is visible to the next. Create one per
//! document and drop it with the document.

use log::warn;
use rhai::{Dynamic, Engine, Scope};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::engine::format_dynamic;
use crate::error::{FormulaError, Result};

/// Executes the source text of a function escape.
pub trait ScriptHost {
    fn run_script(&self, source: &str) -> Result<String>;
}

/// Functions available to every escape.
const PRELUDE: &str = r#"
fn sum2(values) {
    let total = 0.0;
    for v in values {
        total += v;
    }
    total
}
"#;

/// Rhai-backed [`ScriptHost`].
pub struct RhaiHost {
    engine: Engine,
    /// Prelude plus any custom functions, prepended to each escape.
    functions: String,
    scope: Mutex<Scope<'static>>,
}

impl RhaiHost {
    /// Create a host with only the built-in prelude.
    pub fn new() -> Self {
        RhaiHost {
            engine: Engine::new(),
            functions: PRELUDE.to_string(),
            scope: Mutex::new(Scope::new()),
        }
    }

    /// Create a host with custom functions compiled in after the prelude.
    pub fn with_functions(custom_script: Option<&str>) -> Result<Self> {
        let mut host = Self::new();
        if let Some(script) = custom_script {
            let functions = format!("{}\n{}", PRELUDE, script);
            host.engine
                .compile(&functions)
                .map_err(|e| FormulaError::ScriptCompile(e.to_string()))?;
            host.functions = functions;
        }
        Ok(host)
    }
}

/// Drop shadowed entries, keeping the newest binding of each name.
///
/// Re-running `let x = ...;` pushes a fresh `x` every time, and cells are
/// re-evaluated on every read.
fn collapse_shadowed(scope: &mut Scope<'static>) {
    let entries: Vec<(String, bool, Dynamic)> = scope
        .iter()
        .map(|(name, constant, value)| (name.to_string(), constant, value))
        .collect();
    let mut seen = HashSet::new();
    let mut kept: Vec<_> = entries
        .into_iter()
        .rev()
        .filter(|(name, ..)| seen.insert(name.clone()))
        .collect();
    if kept.len() == scope.len() {
        return;
    }

    kept.reverse();
    scope.clear();
    for (name, constant, value) in kept {
        if constant {
            scope.push_constant_dynamic(name, value);
        } else {
            scope.push_dynamic(name, value);
        }
    }
}

impl Default for RhaiHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptHost for RhaiHost {
    fn run_script(&self, source: &str) -> Result<String> {
        // Evaluated as one script so closures in the escape can reach the custom functions.
        let script = format!("{}\n{}", self.functions, source);
        let mut scope = self.scope.lock().unwrap_or_else(PoisonError::into_inner);
        let mark = scope.len();

        let result = self.engine.eval_with_scope::<Dynamic>(&mut scope, &script);
        if scope.len() > mark {
            collapse_shadowed(&mut scope);
        }
        match result {
            Ok(value) => Ok(format_dynamic(&value)),
            Err(e) => {
                warn!("script escape failed: {e}");
                Err(FormulaError::Script(e.to_string()))
            }
        }
    }
}
