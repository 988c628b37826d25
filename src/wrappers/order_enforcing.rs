use crate::core::{Env, GymError, Info, RenderFrame, Result, Step};

/// Rejects `step` (and, unless disabled, `render`) before the first `reset`.
pub struct OrderEnforcing<E: Env> {
    inner: E,
    has_reset: bool,
    disable_render_order_enforcing: bool,
}

impl<E: Env> OrderEnforcing<E> {
    pub fn new(inner: E) -> Self {
        Self { inner, has_reset: false, disable_render_order_enforcing: false }
    }

    /// Allow `render` before the first `reset`.
    pub fn with_render_order_enforcing_disabled(mut self) -> Self {
        self.disable_render_order_enforcing = true;
        self
    }

    pub fn has_reset(&self) -> bool { self.has_reset }
}

impl<E: Env> Env for OrderEnforcing<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    delegate_env!(spaces);

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        self.has_reset = true;
        self.inner.reset(seed, options)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        if !self.has_reset {
            tracing::warn!("step called before reset");
            return Err(GymError::ResetNeeded("Cannot call env.step() before calling env.reset()".into()));
        }
        self.inner.step(action)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> {
        if !self.disable_render_order_enforcing && !self.has_reset {
            tracing::warn!("render called before reset");
            return Err(GymError::ResetNeeded(
                "Cannot call env.render() before calling env.reset(); disable render order enforcing to allow it".into(),
            ));
        }
        self.inner.render()
    }

    delegate_env!(rest);
}

impl_wrapper!(OrderEnforcing<E>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Wrapper;
    use crate::spaces::Value;
    use crate::testing::CountingEnv;

    #[test]
    fn step_before_reset_fails() {
        let mut env = OrderEnforcing::new(CountingEnv::new(None));
        let err = env.step(Value::Int(0)).unwrap_err();
        assert!(matches!(err, GymError::ResetNeeded(_)));
        assert!(env.inner().actions.is_empty());

        env.reset(None, None).unwrap();
        assert!(env.has_reset());
        let s = env.step(Value::Int(1)).unwrap();
        assert_eq!(s.observation, Value::Int(1));
    }

    #[test]
    fn render_before_reset_is_configurable() {
        let mut strict = OrderEnforcing::new(CountingEnv::new(None));
        assert!(strict.render().is_err());

        let mut relaxed = OrderEnforcing::new(CountingEnv::new(None)).with_render_order_enforcing_disabled();
        assert!(relaxed.render().unwrap().is_some());
    }
}
