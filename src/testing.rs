// Small environments shared by unit tests.

use crate::core::{Env, Info, RenderFrame, RenderMode, Result, Step};
use crate::spaces::{Discrete, DynSpace, Value};
use crate::utils::{FramePacer, RngStream, reseed, rng_from_seed};

/// Observes its own step counter; terminates after `terminate_at` steps if set.
pub(crate) struct CountingEnv {
    action_space: DynSpace,
    observation_space: DynSpace,
    pub count: i64,
    pub terminate_at: Option<i64>,
    pub reward: f32,
    pub step_info: Info,
    pub resets: i64,
    pub actions: Vec<Value>,
    pub closed: bool,
    render_mode: Option<RenderMode>,
    pacer: FramePacer,
    rng: RngStream,
}

impl CountingEnv {
    pub fn new(terminate_at: Option<i64>) -> Self {
        Self {
            action_space: Discrete::new(2).unwrap().into(),
            observation_space: Discrete::new(1_000).unwrap().into(),
            count: 0,
            terminate_at,
            reward: 1.0,
            step_info: Info::new(),
            resets: 0,
            actions: Vec::new(),
            closed: false,
            render_mode: None,
            pacer: FramePacer::new(0),
            rng: rng_from_seed(0),
        }
    }

    pub fn with_action_space(mut self, space: impl Into<DynSpace>) -> Self {
        self.action_space = space.into();
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode, fps: u32) -> Self {
        self.render_mode = Some(mode);
        self.pacer = FramePacer::new(fps);
        self
    }
}

impl Env for CountingEnv {
    type Obs = Value;
    type Act = Value;
    type Unwrapped = Self;

    fn action_space(&self) -> &DynSpace { &self.action_space }
    fn observation_space(&self) -> &DynSpace { &self.observation_space }

    fn reset(&mut self, seed: Option<u64>, _options: Option<&Info>) -> Result<(Value, Info)> {
        reseed(&mut self.rng, seed);
        self.count = 0;
        self.resets += 1;
        Ok((Value::Int(0), Info::new().with("resets", self.resets)))
    }

    fn step(&mut self, action: Value) -> Result<Step<Value>> {
        self.actions.push(action);
        self.count += 1;
        let terminated = self.terminate_at == Some(self.count);
        if self.render_mode.is_some_and(RenderMode::is_paced) {
            self.pacer.wait();
        }
        Ok(Step::new(Value::Int(self.count), self.reward, terminated, false, self.step_info.clone()))
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> {
        Ok(Some(RenderFrame::Text(format!("count={}", self.count))))
    }

    fn close(&mut self) { self.closed = true; }

    fn render_mode(&self) -> Option<RenderMode> { self.render_mode }

    fn unwrapped(&self) -> &Self { self }
    fn unwrapped_mut(&mut self) -> &mut Self { self }
}
