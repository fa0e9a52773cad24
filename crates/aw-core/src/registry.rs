use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};

use aw_config::{GlobalFilters, RuleConfig};
use aw_lang::{CompileError, CompiledExpr};

use crate::filters::EffectiveFilters;

/// A watch rule ready to run: compiled expression plus everything the
/// orchestrator needs to route its matches.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub expr: CompiledExpr,
    pub enabled: bool,
    pub channels: Vec<String>,
    pub filters: EffectiveFilters,
}

/// Why a rule was rejected at registry build time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("duplicate rule name {0:?}")]
    DuplicateName(String),
}

/// One rejected rule, reported alongside the registry so the good rules keep
/// running.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDiagnostic {
    pub rule: String,
    pub error: RegistryError,
}

impl fmt::Display for RuleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {:?}: {}", self.rule, self.error)
    }
}

/// All compiled rules, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<CompiledRule>,
    index: HashMap<String, usize>,
    global: GlobalFilters,
}

impl RuleRegistry {
    /// Compile every rule definition. Bad rules never abort the build: each
    /// failure becomes a diagnostic and the rest of the set still registers.
    /// A name used by more than one definition rejects all of its bearers.
    pub fn compile_all(
        defs: &[RuleConfig],
        global: GlobalFilters,
    ) -> (RuleRegistry, Vec<RuleDiagnostic>) {
        let mut seen = HashSet::new();
        let mut duplicates = HashSet::new();
        for def in defs {
            if !seen.insert(def.name.as_str()) {
                duplicates.insert(def.name.as_str());
            }
        }

        let mut registry = RuleRegistry {
            rules: Vec::with_capacity(defs.len()),
            index: HashMap::new(),
            global,
        };
        let mut diagnostics = Vec::new();
        let mut reported = HashSet::new();

        for def in defs {
            if duplicates.contains(def.name.as_str()) {
                if reported.insert(def.name.as_str()) {
                    tracing::warn!(rule = %def.name, "rule name defined more than once, skipping all definitions");
                    diagnostics.push(RuleDiagnostic {
                        rule: def.name.clone(),
                        error: RegistryError::DuplicateName(def.name.clone()),
                    });
                }
                continue;
            }
            match aw_lang::compile(&def.expression) {
                Ok(expr) => {
                    registry.index.insert(def.name.clone(), registry.rules.len());
                    registry.rules.push(CompiledRule {
                        name: def.name.clone(),
                        expr,
                        enabled: def.enabled,
                        channels: def.notify_via.clone(),
                        filters: EffectiveFilters::resolve(
                            &registry.global,
                            def.filters.as_ref(),
                        ),
                    });
                }
                Err(err) => {
                    tracing::warn!(rule = %def.name, error = %err, "rule rejected");
                    diagnostics.push(RuleDiagnostic {
                        rule: def.name.clone(),
                        error: err.into(),
                    });
                }
            }
        }

        tracing::info!(
            registered = registry.rules.len(),
            rejected = diagnostics.len(),
            "rule registry built"
        );
        (registry, diagnostics)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    /// Rules in the order their definitions were given.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    pub fn global_filters(&self) -> &GlobalFilters {
        &self.global
    }
}

/// Registry handle shared across threads. Readers snapshot an `Arc` and keep
/// evaluating against it while a reload swaps in the next build.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: RwLock<Arc<RuleRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: RuleRegistry) -> Self {
        SharedRegistry {
            inner: RwLock::new(Arc::new(registry)),
        }
    }

    pub fn snapshot(&self) -> Arc<RuleRegistry> {
        self.inner.read().expect("registry lock poisoned").clone()
    }

    /// Build a fresh registry from the new definitions, then swap it in. The
    /// old registry stays valid for snapshots taken before the swap.
    pub fn reload(&self, defs: &[RuleConfig], global: GlobalFilters) -> Vec<RuleDiagnostic> {
        let (registry, diagnostics) = RuleRegistry::compile_all(defs, global);
        *self.inner.write().expect("registry lock poisoned") = Arc::new(registry);
        diagnostics
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
