// Core traits and types: the Env lifecycle contract shared by environments and wrappers.

use crate::spaces::DynSpace;

/// A small ordered info map returned alongside observations.
/// Keys are unique; nested records are stored as `InfoValue::Map`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Info {
    entries: Vec<(String, InfoValue)>,
}

impl Info {
    /// Create an empty Info map.
    pub fn new() -> Self { Self { entries: Vec::new() } }

    /// Insert or replace a key with the given value.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: impl Into<InfoValue>) {
        let k = key.into();
        let value = value.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(kk, _)| kk == &k) {
            *v = value;
        } else {
            self.entries.push((k, value));
        }
    }

    /// Builder-style insert.
    pub fn with<K: Into<String>>(mut self, key: K, value: impl Into<InfoValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a reference to a value by key.
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool { self.get(key).is_some() }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Number of entries.
    pub fn len(&self) -> usize { self.entries.len() }
}

/// A small set of value types commonly used in info maps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
    Map(Info),
}

impl InfoValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            InfoValue::F64(v) => Some(*v),
            InfoValue::I64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            InfoValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Info> {
        match self {
            InfoValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for InfoValue { fn from(v: bool) -> Self { InfoValue::Bool(v) } }
impl From<i64> for InfoValue { fn from(v: i64) -> Self { InfoValue::I64(v) } }
impl From<i32> for InfoValue { fn from(v: i32) -> Self { InfoValue::I64(v as i64) } }
impl From<u32> for InfoValue { fn from(v: u32) -> Self { InfoValue::I64(v as i64) } }
impl From<f64> for InfoValue { fn from(v: f64) -> Self { InfoValue::F64(v) } }
impl From<f32> for InfoValue { fn from(v: f32) -> Self { InfoValue::F64(v as f64) } }
impl From<&str> for InfoValue { fn from(v: &str) -> Self { InfoValue::Str(v.to_string()) } }
impl From<String> for InfoValue { fn from(v: String) -> Self { InfoValue::Str(v) } }
impl From<Info> for InfoValue { fn from(v: Info) -> Self { InfoValue::Map(v) } }

/// How an environment presents its frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Frames are presented to a human; `step`/`render` are paced to `render_fps`.
    Human,
    /// `render` returns an RGB(A) pixel buffer.
    RgbArray,
    /// `render` returns a text frame.
    Ansi,
}

impl RenderMode {
    /// Whether calls in this mode are expected to wait out a frame interval.
    pub fn is_paced(self) -> bool { matches!(self, RenderMode::Human) }
}

/// A frame returned by `Env::render`.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderFrame {
    /// Textual representation of a frame (e.g., ASCII art or debug string).
    Text(String),
    /// Raw pixel buffer in row-major RGB or RGBA format.
    Pixels {
        width: u32,
        height: u32,
        /// Pixel data. Convention: RGB uses 3 bytes per pixel, RGBA uses 4.
        data: Vec<u8>,
    },
}

/// A step result from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<Obs> {
    pub observation: Obs,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

impl<Obs> Step<Obs> {
    pub fn new(observation: Obs, reward: f32, terminated: bool, truncated: bool, info: Info) -> Self {
        Self { observation, reward, terminated, truncated, info }
    }

    /// The episode ended, either naturally or by an external limit.
    pub fn is_done(&self) -> bool { self.terminated || self.truncated }

    /// Replace the observation, keeping every other field.
    pub fn map_observation<O2>(self, f: impl FnOnce(Obs) -> O2) -> Step<O2> {
        Step {
            observation: f(self.observation),
            reward: self.reward,
            terminated: self.terminated,
            truncated: self.truncated,
            info: self.info,
        }
    }
}

/// Errors raised by spaces, environments and wrappers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GymError {
    #[error("Invalid space: {0}")]
    InvalidSpace(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Reset needed: {0}")]
    ResetNeeded(String),
    #[error("Info key already present: {0}")]
    InfoKeyCollision(String),
    #[error("Unsupported space: {0}")]
    UnsupportedSpace(String),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Convenience alias for results using GymError.
pub type Result<T> = std::result::Result<T, GymError>;

/// Core environment trait following the Gymnasium contract.
///
/// An environment owns its action and observation spaces. Wrappers implement the
/// same trait and delegate to the environment they wrap; `Unwrapped` names the
/// innermost environment type at the end of that chain.
pub trait Env {
    type Obs;
    type Act;
    /// The bare environment at the bottom of a wrapper chain (`Self` for a bare env).
    type Unwrapped: Env;

    fn action_space(&self) -> &DynSpace;

    fn observation_space(&self) -> &DynSpace;

    /// Reset the environment to an initial state.
    /// Implementations should re-seed internal RNGs when `seed` is provided.
    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)>;

    /// Apply an action and advance the environment by one step.
    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>>;

    /// Render a frame of the current state, if supported.
    fn render(&mut self) -> Result<Option<RenderFrame>> { Ok(None) }

    /// Close and release any external resources.
    fn close(&mut self) {}

    fn render_mode(&self) -> Option<RenderMode> { None }

    fn unwrapped(&self) -> &Self::Unwrapped;

    fn unwrapped_mut(&mut self) -> &mut Self::Unwrapped;
}

/// A layer over another environment.
pub trait Wrapper: Env {
    type Inner: Env;

    fn inner(&self) -> &Self::Inner;
    fn inner_mut(&mut self) -> &mut Self::Inner;
    fn into_inner(self) -> Self::Inner;
}

impl<E: Env + ?Sized> Env for Box<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    fn action_space(&self) -> &DynSpace { (**self).action_space() }
    fn observation_space(&self) -> &DynSpace { (**self).observation_space() }

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        (**self).reset(seed, options)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> { (**self).step(action) }
    fn render(&mut self) -> Result<Option<RenderFrame>> { (**self).render() }
    fn close(&mut self) { (**self).close() }
    fn render_mode(&self) -> Option<RenderMode> { (**self).render_mode() }
    fn unwrapped(&self) -> &Self::Unwrapped { (**self).unwrapped() }
    fn unwrapped_mut(&mut self) -> &mut Self::Unwrapped { (**self).unwrapped_mut() }
}
