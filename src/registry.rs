// Environment specs and `make`: configuration-driven assembly of the standard wrapper stack.

use crate::core::{Env, Result};
use crate::wrappers::{Autoreset, OrderEnforcing, TimeLimit};

/// A boxed environment stack over `E`, still unwrapping to `E`'s bare environment.
pub type BoxedEnv<E> =
    Box<dyn Env<Obs = <E as Env>::Obs, Act = <E as Env>::Act, Unwrapped = <E as Env>::Unwrapped>>;

/// Environment specification metadata and the wrappers `make` applies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvSpec {
    /// Identifier like "CartPole-v1".
    pub id: String,
    /// Step budget enforced with `TimeLimit`.
    pub max_episode_steps: Option<u32>,
    /// Target reward threshold for a "solved" score, if defined.
    pub reward_threshold: Option<f32>,
    /// Whether environment has inherent nondeterminism beyond RNG seed.
    pub nondeterministic: bool,
    /// Wrap with `OrderEnforcing`.
    pub order_enforce: bool,
    /// Let `OrderEnforcing` allow `render` before `reset`.
    pub disable_render_order_enforcing: bool,
    /// Wrap with `Autoreset`.
    pub autoreset: bool,
}

impl Default for EnvSpec {
    fn default() -> Self { Self::new("") }
}

impl EnvSpec {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            max_episode_steps: None,
            reward_threshold: None,
            nondeterministic: false,
            order_enforce: true,
            disable_render_order_enforcing: false,
            autoreset: false,
        }
    }

    pub fn with_max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    pub fn with_reward_threshold(mut self, threshold: f32) -> Self {
        self.reward_threshold = Some(threshold);
        self
    }

    pub fn with_order_enforce(mut self, enabled: bool) -> Self {
        self.order_enforce = enabled;
        self
    }

    pub fn with_render_order_enforcing_disabled(mut self) -> Self {
        self.disable_render_order_enforcing = true;
        self
    }

    pub fn with_autoreset(mut self, enabled: bool) -> Self {
        self.autoreset = enabled;
        self
    }
}

/// Wrap `env` per `spec`, innermost first: `OrderEnforcing`, `TimeLimit`, `Autoreset`.
pub fn make<E>(env: E, spec: &EnvSpec) -> Result<BoxedEnv<E>>
where
    E: Env + 'static,
    E::Obs: 'static,
    E::Act: 'static,
    E::Unwrapped: 'static,
{
    let mut stack: BoxedEnv<E> = Box::new(env);
    if spec.order_enforce {
        let layer = OrderEnforcing::new(stack);
        stack = if spec.disable_render_order_enforcing {
            Box::new(layer.with_render_order_enforcing_disabled())
        } else {
            Box::new(layer)
        };
    }
    if let Some(max_episode_steps) = spec.max_episode_steps {
        stack = Box::new(TimeLimit::new(stack, max_episode_steps)?);
    }
    if spec.autoreset {
        stack = Box::new(Autoreset::new(stack));
    }
    tracing::debug!(
        id = %spec.id,
        order_enforce = spec.order_enforce,
        max_episode_steps = ?spec.max_episode_steps,
        autoreset = spec.autoreset,
        "assembled environment stack"
    );
    Ok(stack)
}
