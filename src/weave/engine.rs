//! The weaving orchestrator.

use crate::{
    metadata::module::Module,
    weave::{
        classify::{self, CandidateSet},
        config::WeaveConfig,
        observer::WeaveObservers,
        rewrite, transform,
    },
    Error, Result,
};

/// Orchestrates one complete weaving pass over a single module.
///
/// The pass is single-threaded, synchronous, and deterministic: it classifies
/// once, transforms every candidate, rewrites all call sites, then emits one
/// completion notice per candidate. Mutation is in place on the caller-owned
/// graph, and the engine assumes exclusive access to the module for the
/// duration of the call.
///
/// # Example
///
/// ```rust
/// use cilweave::prelude::*;
///
/// let mut module = Module::new("App.exe");
/// let mut report = Vec::new();
///
/// let weaver = Weaver::new(WeaveConfig::default());
/// weaver.run(
///     &mut module,
///     WeaveObservers::new().on_info(|line| report.push(line.to_string())),
/// )?;
///
/// // No compiler-generated cache types in an empty module: zero notices.
/// assert!(report.is_empty());
/// # Ok::<(), cilweave::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Weaver {
    config: WeaveConfig,
}

impl Weaver {
    /// Creates a weaver with the given configuration.
    #[must_use]
    pub fn new(config: WeaveConfig) -> Self {
        Weaver { config }
    }

    /// Runs the pass unless the host configuration opted out.
    ///
    /// This is the entry the host pipeline calls; it resolves nothing itself,
    /// the opt-out decision was made by the host when it built the
    /// [`WeaveConfig`].
    ///
    /// # Errors
    ///
    /// Propagates any object-graph inconsistency surfaced by the pass; see
    /// [`execute`](Self::execute).
    pub fn run(&self, module: &mut Module, observers: WeaveObservers<'_>) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }
        Self::execute(module, observers)
    }

    /// Executes one weaving pass over the module.
    ///
    /// Phases run in fixed dependency order: the candidate set is computed
    /// once and frozen before any mutation (the call-site scan must never see
    /// types invalidated or added mid-pass), then every candidate's members
    /// are converted, then all call sites are rewritten. Finding no eligible
    /// type is success: zero mutations, zero notifications.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingToken`] or [`Error::MalformedOperand`] when
    /// the loader-supplied graph is inconsistent; the module may then be left
    /// partially transformed, as the pass has no rollback path.
    pub fn execute(module: &mut Module, mut observers: WeaveObservers<'_>) -> Result<()> {
        let candidates = classify::classify(module);

        Self::transform_candidates(module, &candidates, &mut observers)?;
        rewrite::apply(module, &candidates, &mut observers)?;

        for name in candidates.names() {
            observers.info(|| format!("Finished processing {name}!"));
        }

        Ok(())
    }

    /// Converts every candidate's members in candidate order.
    fn transform_candidates(
        module: &mut Module,
        candidates: &CandidateSet,
        observers: &mut WeaveObservers<'_>,
    ) -> Result<()> {
        for &token in candidates.tokens() {
            let ty = module
                .type_by_token_mut(token)
                .ok_or_else(|| Error::DanglingToken {
                    token,
                    context: "eligible type".to_string(),
                })?;
            transform::apply(ty, observers);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assembly::OpCode,
        metadata::{method::MethodAccessFlags, typedef::TypeAttributes},
        test::factories,
        weave::WeaveConfig,
    };

    #[test]
    fn test_full_pass_over_call_site_module() {
        let mut module = factories::module_with_call_site();
        Weaver::default()
            .run(&mut module, WeaveObservers::default())
            .unwrap();

        let cache = &module.types[1];
        assert_eq!(cache.visibility(), TypeAttributes::NESTED_PUBLIC);
        let invoke = cache.methods.iter().find(|m| !m.is_constructor()).unwrap();
        assert!(invoke.is_static());
        assert_eq!(invoke.access, MethodAccessFlags::PUBLIC);

        let main = &module.types[0].methods[0];
        assert_eq!(main.body[0].opcode, OpCode::Ldnull);
    }

    #[test]
    fn test_disabled_config_is_a_no_op() {
        let mut module = factories::module_with_call_site();
        let before = format!("{module:?}");

        let any_line = std::cell::Cell::new(false);
        {
            let observers = WeaveObservers::new()
                .on_debug(|_| any_line.set(true))
                .on_info(|_| any_line.set(true));
            Weaver::new(WeaveConfig::disabled())
                .run(&mut module, observers)
                .unwrap();
        }

        assert!(!any_line.get());
        assert_eq!(format!("{module:?}"), before);
    }

    #[test]
    fn test_completion_notice_per_candidate() {
        let mut module = factories::module_with_two_caches();

        let mut info_lines = Vec::new();
        {
            let observers =
                WeaveObservers::new().on_info(|line| info_lines.push(line.to_string()));
            Weaver::default().run(&mut module, observers).unwrap();
        }

        assert_eq!(
            info_lines,
            vec![
                "Finished processing App.Program/<>c!",
                "Finished processing App.Worker/<>c!",
            ]
        );
    }
}
