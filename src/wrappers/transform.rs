//! Transform wrappers: rewrite exactly one component of the data crossing the boundary.
//!
//! Each wrapper is generic over a transform trait. Closures are adapted with
//! `MapObservation` / `MapAction` / `MapReward`; `ClipAction` and `ClipReward` are the
//! wrappers instantiated with `ActionClip` and `RewardClip`.

use std::marker::PhantomData;

use crate::core::{Env, GymError, Info, RenderFrame, Result, Step};
use crate::spaces::{BoxSpace, DynSpace, Value};

/// Maps observations coming out of the inner environment.
pub trait ObservationTransform<O> {
    type Output;

    fn observation(&self, observation: O) -> Self::Output;

    /// Space of transformed observations, when it differs from the inner one.
    fn observation_space(&self, _inner: &DynSpace) -> Option<DynSpace> { None }
}

/// Maps caller actions into actions of the inner environment.
pub trait ActionTransform<A> {
    type Input;

    fn action(&self, action: Self::Input) -> Result<A>;

    /// Space of accepted caller actions, when it differs from the inner one.
    fn action_space(&self, _inner: &DynSpace) -> Option<DynSpace> { None }
}

/// Maps rewards coming out of the inner environment.
pub trait RewardTransform {
    fn reward(&self, reward: f32) -> f32;
}

/// Closure adapter for `ObservationTransform`.
pub struct MapObservation<F>(pub F);

impl<O, O2, F: Fn(O) -> O2> ObservationTransform<O> for MapObservation<F> {
    type Output = O2;
    fn observation(&self, observation: O) -> O2 { (self.0)(observation) }
}

/// Closure adapter for `ActionTransform`.
pub struct MapAction<F, A2> {
    f: F,
    _marker: PhantomData<fn(A2)>,
}

impl<F, A2> MapAction<F, A2> {
    pub fn new(f: F) -> Self { Self { f, _marker: PhantomData } }
}

impl<A, A2, F: Fn(A2) -> A> ActionTransform<A> for MapAction<F, A2> {
    type Input = A2;
    fn action(&self, action: A2) -> Result<A> { Ok((self.f)(action)) }
}

/// Closure adapter for `RewardTransform`.
pub struct MapReward<F>(pub F);

impl<F: Fn(f32) -> f32> RewardTransform for MapReward<F> {
    fn reward(&self, reward: f32) -> f32 { (self.0)(reward) }
}

/// Applies an `ObservationTransform` to the observation of every `reset` and `step`.
pub struct ObservationWrapper<E: Env, T> {
    inner: E,
    transform: T,
    observation_space: Option<DynSpace>,
}

impl<E: Env, T: ObservationTransform<E::Obs>> ObservationWrapper<E, T> {
    pub fn new(inner: E, transform: T) -> Self {
        let observation_space = transform.observation_space(inner.observation_space());
        Self { inner, transform, observation_space }
    }

    /// Present `space` as this layer's observation space.
    pub fn with_observation_space(mut self, space: DynSpace) -> Self {
        self.observation_space = Some(space);
        self
    }
}

impl<E, F, O2> ObservationWrapper<E, MapObservation<F>>
where
    E: Env,
    F: Fn(E::Obs) -> O2,
{
    pub fn from_fn(inner: E, f: F) -> Self { Self::new(inner, MapObservation(f)) }
}

impl<E: Env, T: ObservationTransform<E::Obs>> Env for ObservationWrapper<E, T> {
    type Obs = T::Output;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    fn action_space(&self) -> &DynSpace { self.inner.action_space() }

    fn observation_space(&self) -> &DynSpace {
        self.observation_space.as_ref().unwrap_or_else(|| self.inner.observation_space())
    }

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        let (obs, info) = self.inner.reset(seed, options)?;
        Ok((self.transform.observation(obs), info))
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let s = self.inner.step(action)?;
        Ok(s.map_observation(|o| self.transform.observation(o)))
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> { self.inner.render() }

    delegate_env!(rest);
}

impl_wrapper!(ObservationWrapper<E, T>);

/// Applies an `ActionTransform` to every action before forwarding it.
pub struct ActionWrapper<E: Env, T> {
    inner: E,
    transform: T,
    action_space: Option<DynSpace>,
}

impl<E: Env, T: ActionTransform<E::Act>> ActionWrapper<E, T> {
    pub fn new(inner: E, transform: T) -> Self {
        let action_space = transform.action_space(inner.action_space());
        Self { inner, transform, action_space }
    }

    /// Present `space` as this layer's action space.
    pub fn with_action_space(mut self, space: DynSpace) -> Self {
        self.action_space = Some(space);
        self
    }
}

impl<E, F, A2> ActionWrapper<E, MapAction<F, A2>>
where
    E: Env,
    F: Fn(A2) -> E::Act,
{
    pub fn from_fn(inner: E, f: F) -> Self { Self::new(inner, MapAction::new(f)) }
}

impl<E: Env, T: ActionTransform<E::Act>> Env for ActionWrapper<E, T> {
    type Obs = E::Obs;
    type Act = T::Input;
    type Unwrapped = E::Unwrapped;

    fn action_space(&self) -> &DynSpace {
        self.action_space.as_ref().unwrap_or_else(|| self.inner.action_space())
    }

    fn observation_space(&self) -> &DynSpace { self.inner.observation_space() }

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        self.inner.reset(seed, options)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let inner_action = self.transform.action(action)?;
        self.inner.step(inner_action)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> { self.inner.render() }

    delegate_env!(rest);
}

impl_wrapper!(ActionWrapper<E, T>);

/// Applies a `RewardTransform` to the reward of every step.
pub struct RewardWrapper<E: Env, T> {
    inner: E,
    transform: T,
}

impl<E: Env, T: RewardTransform> RewardWrapper<E, T> {
    pub fn new(inner: E, transform: T) -> Self { Self { inner, transform } }
}

impl<E: Env, F: Fn(f32) -> f32> RewardWrapper<E, MapReward<F>> {
    pub fn from_fn(inner: E, f: F) -> Self { Self::new(inner, MapReward(f)) }
}

impl<E: Env, T: RewardTransform> Env for RewardWrapper<E, T> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    delegate_env!(spaces);

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        self.inner.reset(seed, options)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let mut s = self.inner.step(action)?;
        s.reward = self.transform.reward(s.reward);
        Ok(s)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> { self.inner.render() }

    delegate_env!(rest);
}

impl_wrapper!(RewardWrapper<E, T>);

/// Clamps array actions into the bounds of a Box action space.
///
/// The wrapped layer advertises an unbounded Box of the same shape and dtype, since
/// any action of that shape is accepted and clipped.
#[derive(Clone, Debug)]
pub struct ActionClip {
    bounds: BoxSpace,
}

impl ActionClip {
    /// Fails with `UnsupportedSpace` unless `space` is a Box.
    pub fn for_space(space: &DynSpace) -> Result<Self> {
        let bounds = space.as_box().ok_or_else(|| {
            GymError::UnsupportedSpace(format!("ClipAction requires a Box action space, got {}", space.kind()))
        })?;
        Ok(Self { bounds: bounds.clone() })
    }
}

impl ActionTransform<Value> for ActionClip {
    type Input = Value;

    fn action(&self, action: Value) -> Result<Value> {
        match action {
            Value::Array(a) => Ok(Value::Array(self.bounds.clip(&a.to_f64()))),
            other => Err(GymError::InvalidAction(format!("ClipAction expects an array action, got {other:?}"))),
        }
    }

    fn action_space(&self, inner: &DynSpace) -> Option<DynSpace> {
        let b = inner.as_box()?;
        let shape = crate::spaces::Space::shape(b).unwrap_or(&[]);
        let dtype = crate::spaces::Space::dtype(b)?;
        BoxSpace::uniform(shape, f64::NEG_INFINITY, f64::INFINITY, dtype).ok().map(DynSpace::from)
    }
}

/// Clamps rewards into `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardClip {
    min: f32,
    max: f32,
}

impl RewardClip {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if min.is_nan() || max.is_nan() || max < min {
            return Err(GymError::InvalidArgument(format!("ClipReward requires min <= max, got [{min}, {max}]")));
        }
        Ok(Self { min, max })
    }
}

impl RewardTransform for RewardClip {
    fn reward(&self, reward: f32) -> f32 { reward.clamp(self.min, self.max) }
}

pub type ClipAction<E> = ActionWrapper<E, ActionClip>;
pub type ClipReward<E> = RewardWrapper<E, RewardClip>;

pub type TransformObservation<E, F> = ObservationWrapper<E, MapObservation<F>>;
pub type TransformAction<E, F, A2> = ActionWrapper<E, MapAction<F, A2>>;
pub type TransformReward<E, F> = RewardWrapper<E, MapReward<F>>;

impl<E: Env<Act = Value>> ActionWrapper<E, ActionClip> {
    /// Wrap `inner`, clipping actions into its Box action space.
    pub fn clip(inner: E) -> Result<Self> {
        let transform = ActionClip::for_space(inner.action_space())?;
        Ok(Self::new(inner, transform))
    }
}

impl<E: Env> RewardWrapper<E, RewardClip> {
    pub fn clip(inner: E, min: f32, max: f32) -> Result<Self> {
        Ok(Self::new(inner, RewardClip::new(min, max)?))
    }
}
