use std::collections::VecDeque;
use std::time::Instant;

use crate::core::{Env, GymError, Info, InfoValue, RenderFrame, Result, Step};

/// Summary of one finished episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeStatistics {
    pub rewards: f64,
    pub length: u64,
    /// Wall-clock seconds since the episode's reset.
    pub time: f64,
}

impl EpisodeStatistics {
    fn to_info(&self) -> Info {
        Info::new()
            .with("rewards", self.rewards)
            .with("length", InfoValue::I64(self.length as i64))
            .with("time", self.time)
    }
}

/// Tracks cumulative reward and step count per episode.
///
/// On the step that ends an episode the statistics are inserted into that step's info
/// as a sub-record under `info_key` (default `"episode"`) with keys `rewards`,
/// `length` and `time`. A key already present in the inner info is an error.
pub struct RecordEpisodeStatistics<E: Env> {
    inner: E,
    info_key: String,
    episode_start: Instant,
    episode_rewards: f64,
    episode_length: u64,
    buffer_length: usize,
    history: VecDeque<EpisodeStatistics>,
}

impl<E: Env> RecordEpisodeStatistics<E> {
    pub const DEFAULT_INFO_KEY: &'static str = "episode";
    pub const DEFAULT_BUFFER_LENGTH: usize = 100;

    pub fn new(inner: E) -> Self {
        Self {
            inner,
            info_key: Self::DEFAULT_INFO_KEY.to_string(),
            episode_start: Instant::now(),
            episode_rewards: 0.0,
            episode_length: 0,
            buffer_length: Self::DEFAULT_BUFFER_LENGTH,
            history: VecDeque::with_capacity(Self::DEFAULT_BUFFER_LENGTH),
        }
    }

    pub fn with_info_key(mut self, key: impl Into<String>) -> Self {
        self.info_key = key.into();
        self
    }

    /// Keep statistics for at most `n` recent episodes.
    pub fn with_buffer_length(mut self, n: usize) -> Self {
        self.buffer_length = n;
        while self.history.len() > n {
            self.history.pop_front();
        }
        self
    }

    pub fn info_key(&self) -> &str { &self.info_key }

    /// Recently finished episodes, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &EpisodeStatistics> { self.history.iter() }

    pub fn episode_rewards(&self) -> f64 { self.episode_rewards }
    pub fn episode_length(&self) -> u64 { self.episode_length }

    fn start_episode(&mut self) {
        self.episode_start = Instant::now();
        self.episode_rewards = 0.0;
        self.episode_length = 0;
    }
}

impl<E: Env> Env for RecordEpisodeStatistics<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Unwrapped = E::Unwrapped;

    delegate_env!(spaces);

    fn reset(&mut self, seed: Option<u64>, options: Option<&Info>) -> Result<(Self::Obs, Info)> {
        let out = self.inner.reset(seed, options)?;
        self.start_episode();
        Ok(out)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let mut s = self.inner.step(action)?;
        let done = s.is_done();
        if done && s.info.contains_key(&self.info_key) {
            tracing::warn!(key = %self.info_key, "episode statistics key already present in info");
            return Err(GymError::InfoKeyCollision(format!(
                "Attempted to add episode stats under key '{}' but it already exists in info",
                self.info_key
            )));
        }

        self.episode_rewards += f64::from(s.reward);
        self.episode_length += 1;

        if done {
            let stats = EpisodeStatistics {
                rewards: self.episode_rewards,
                length: self.episode_length,
                time: self.episode_start.elapsed().as_secs_f64(),
            };
            tracing::debug!(rewards = stats.rewards, length = stats.length, "episode finished");
            s.info.insert(self.info_key.clone(), stats.to_info());
            if self.buffer_length > 0 {
                if self.history.len() == self.buffer_length {
                    self.history.pop_front();
                }
                self.history.push_back(stats);
            }
            // Ready for an episode that continues without an explicit reset (e.g. under Autoreset).
            self.start_episode();
        }
        Ok(s)
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> { self.inner.render() }

    delegate_env!(rest);
}

impl_wrapper!(RecordEpisodeStatistics<E>);
