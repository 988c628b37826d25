//! Gymnasium-style environment contract: typed spaces, the `Env` lifecycle, and
//! composable wrappers.

pub mod core;
pub mod registry;
pub mod spaces;
pub mod utils;
pub mod wrappers;

#[cfg(test)]
mod testing;

pub use crate::core::{Env, GymError, Info, InfoValue, RenderFrame, RenderMode, Result, Step, Wrapper};
pub use crate::registry::{BoxedEnv, EnvSpec, make};
pub use crate::spaces::{Array, BoxSpace, DType, Discrete, DynSpace, MultiBinary, MultiDiscrete, Space, TupleSpace, Value};
pub use crate::utils::FramePacer;
pub use crate::wrappers::{
    ActionWrapper, Autoreset, ClipAction, ClipReward, ObservationWrapper, OrderEnforcing, RecordEpisodeStatistics,
    RewardWrapper, TimeLimit, TransformAction, TransformObservation, TransformReward,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingEnv;

    #[test]
    fn unwrapped_walks_a_deep_chain() {
        let env = CountingEnv::new(Some(2));
        let env = OrderEnforcing::new(env);
        let env = TimeLimit::new(env, 10).unwrap();
        let env = RecordEpisodeStatistics::new(env);
        let mut env = Autoreset::new(env);
        env.reset(None, None).unwrap();
        env.step(Value::Int(1)).unwrap();
        assert_eq!(env.unwrapped().count, 1);
        env.unwrapped_mut().reward = 3.0;
        let s = env.step(Value::Int(1)).unwrap();
        assert_eq!(s.reward, 3.0);
        assert!(s.terminated);
        assert_eq!(env.inner().inner().elapsed_steps(), 2);
    }

    #[test]
    fn spaces_delegate_through_wrappers() {
        let base = CountingEnv::new(None);
        let expected = base.action_space().clone();
        let env = TimeLimit::new(OrderEnforcing::new(base), 5).unwrap();
        assert_eq!(env.action_space(), &expected);
        assert_eq!(env.observation_space(), &DynSpace::from(Discrete::new(1_000).unwrap()));
    }

    #[test]
    fn human_mode_paces_steps() {
        let base = CountingEnv::new(None).with_render_mode(RenderMode::Human, 50);
        let mut env = OrderEnforcing::new(base);
        assert_eq!(env.render_mode(), Some(RenderMode::Human));
        env.reset(None, None).unwrap();
        env.step(Value::Int(0)).unwrap();
        let t = std::time::Instant::now();
        env.step(Value::Int(0)).unwrap();
        assert!(t.elapsed() >= std::time::Duration::from_millis(15));
    }
}
