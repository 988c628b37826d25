// Wrappers: layers over an Env that delegate by default.
//
// Lifecycle wrappers each add one piece of episode state:
// - OrderEnforcing: reset before step/render
// - Autoreset: reset on the step after an episode ends
// - TimeLimit: truncate after a step budget
// - RecordEpisodeStatistics: episode return/length/time in the final info
//
// Transform wrappers rewrite one component at the boundary:
// - ObservationWrapper / ActionWrapper / RewardWrapper
// - ClipAction / ClipReward

/// Forward the parts of `Env` a wrapper does not change to `self.inner`.
macro_rules! delegate_env {
    (spaces) => {
        fn action_space(&self) -> &$crate::spaces::DynSpace { self.inner.action_space() }
        fn observation_space(&self) -> &$crate::spaces::DynSpace { self.inner.observation_space() }
    };
    (rest) => {
        fn close(&mut self) { self.inner.close() }
        fn render_mode(&self) -> Option<$crate::core::RenderMode> { self.inner.render_mode() }
        fn unwrapped(&self) -> &Self::Unwrapped { self.inner.unwrapped() }
        fn unwrapped_mut(&mut self) -> &mut Self::Unwrapped { self.inner.unwrapped_mut() }
    };
}

/// `Wrapper` accessors for a struct whose wrapped env lives in `inner`.
macro_rules! impl_wrapper {
    ($ty:ident < E $(, $p:ident)* >) => {
        impl<E: $crate::core::Env $(, $p)*> $crate::core::Wrapper for $ty<E $(, $p)*>
        where
            $ty<E $(, $p)*>: $crate::core::Env,
        {
            type Inner = E;
            fn inner(&self) -> &E { &self.inner }
            fn inner_mut(&mut self) -> &mut E { &mut self.inner }
            fn into_inner(self) -> E { self.inner }
        }
    };
}

pub mod autoreset;
pub mod order_enforcing;
pub mod record_episode_statistics;
pub mod time_limit;
pub mod transform;

pub use autoreset::Autoreset;
pub use order_enforcing::OrderEnforcing;
pub use record_episode_statistics::{EpisodeStatistics, RecordEpisodeStatistics};
pub use time_limit::TimeLimit;
pub use transform::{
    ActionClip, ActionTransform, ActionWrapper, ClipAction, ClipReward, MapAction, MapObservation, MapReward,
    ObservationTransform, ObservationWrapper, RewardClip, RewardTransform, RewardWrapper, TransformAction,
    TransformObservation, TransformReward,
};
