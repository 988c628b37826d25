use crate::core::{Env, Info, RenderFrame, Result, Step};

/// Resets the environment on the step after an episode ends.
///
/// When the previous `step` returned `terminated` or `truncated`, the next `step`
/// does not forward its action: it resets the inner environment and returns the
/// fresh observation and info with zero reward and both flags cleared.
pub struct Autoreset<E: Env> {
    inner: E,
    needs_reset: bool,
}

impl<E: Env> Autoreset<E> {
    pub fn new(inner: E) -> Self { Self { inner, needs_reset: false } }

    /// Whether the next `step` will reset instead of stepping.
    pub fn needs_reset(&self) -> bool { self.needs_reset }
}

impl<E: Env> Env for Autoreset<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    delegate_env!(spaces);

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        let out = self.inner.reset(seed, options)?;
        self.needs_reset = false;
        Ok(out)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        if self.needs_reset {
            let (observation, info) = self.inner.reset(None, None)?;
            self.needs_reset = false;
            tracing::debug!("autoreset after finished episode");
            return Ok(Step::new(observation, 0.0, false, false, info));
        }
        let step = self.inner.step(action)?;
        self.needs_reset = step.is_done();
        Ok(step)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> { self.inner.render() }

    delegate_env!(rest);
}

impl_wrapper!(Autoreset<E>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Wrapper;
    use crate::spaces::Value;
    use crate::testing::CountingEnv;

    #[test]
    fn step_after_termination_resets_without_consuming_action() {
        let mut env = Autoreset::new(CountingEnv::new(Some(3)));
        let (first_obs, first_info) = env.reset(None, None).unwrap();
        for i in 1..=3 {
            let s = env.step(Value::Int(i)).unwrap();
            assert_eq!(s.terminated, i == 3);
        }
        assert!(env.needs_reset());

        let s = env.step(Value::Int(99)).unwrap();
        assert_eq!(s.observation, first_obs);
        assert_eq!(s.reward, 0.0);
        assert!(!s.terminated && !s.truncated);
        assert_eq!(s.info.len(), first_info.len());
        assert!(s.info.contains_key("resets"));
        assert_eq!(env.inner().actions.len(), 3);
        assert!(!env.needs_reset());

        let s = env.step(Value::Int(0)).unwrap();
        assert_eq!(s.observation, Value::Int(1));
    }

    #[test]
    fn explicit_reset_clears_pending_autoreset() {
        let mut env = Autoreset::new(CountingEnv::new(Some(1)));
        env.reset(None, None).unwrap();
        assert!(env.step(Value::Int(0)).unwrap().terminated);
        env.reset(None, None).unwrap();
        assert!(!env.needs_reset());
        let s = env.step(Value::Int(0)).unwrap();
        assert_eq!(s.reward, 1.0);
        assert_eq!(env.inner().resets, 2);
    }
}
