use crate::core::{Env, GymError, Info, RenderFrame, Result, Step};

/// Truncates an episode once `max_episode_steps` steps have been taken since reset.
pub struct TimeLimit<E: Env> {
    inner: E,
    max_episode_steps: u32,
    elapsed_steps: u32,
}

impl<E: Env> TimeLimit<E> {
    pub fn new(inner: E, max_episode_steps: u32) -> Result<Self> {
        if max_episode_steps == 0 {
            return Err(GymError::InvalidArgument("TimeLimit requires max_episode_steps > 0".into()));
        }
        Ok(Self { inner, max_episode_steps, elapsed_steps: 0 })
    }

    pub fn max_episode_steps(&self) -> u32 { self.max_episode_steps }
    pub fn elapsed_steps(&self) -> u32 { self.elapsed_steps }
}

impl<E: Env> Env for TimeLimit<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    delegate_env!(spaces);

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        let out = self.inner.reset(seed, options)?;
        self.elapsed_steps = 0;
        Ok(out)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let mut s = self.inner.step(action)?;
        self.elapsed_steps = self.elapsed_steps.saturating_add(1);
        if self.elapsed_steps >= self.max_episode_steps {
            if !s.truncated {
                tracing::debug!(elapsed_steps = self.elapsed_steps, "time limit reached, truncating episode");
            }
            s.truncated = true;
        }
        Ok(s)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> { self.inner.render() }

    delegate_env!(rest);
}

impl_wrapper!(TimeLimit<E>);
