//! Wave sequencer — schedules one spawn per wave slot.
//!
//! The sequencer is a cooperative task expressed as an explicit state
//! machine. Each call to [`WaveSequencer::advance`] moves its clock
//! forward and runs every step whose resume time has been reached, so a
//! single long tick can cross several suspension points while every
//! spawn keeps its exact scheduled time.
//!
//! Per wave: spawn slot 0, wait one spawn interval, spawn slot 1, wait,
//! ... then wait `time_between_waves`. Looping lists restart at wave 0.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use salvo_core::enums::SequencerStatus;
use salvo_core::error::ConfigError;
use salvo_core::state::SequencerView;
use salvo_core::types::WaveDefinition;

use crate::spawn_timer::SpawnTimer;

/// One due wave slot. Consumed immediately by the spawn factory.
#[derive(Debug, Clone)]
pub struct SpawnEvent {
    pub wave: Arc<WaveDefinition>,
    pub wave_index: usize,
    pub slot: usize,
    /// Sequencer clock value the slot was due at (seconds since start).
    pub scheduled_at: f64,
}

/// Receives sequencer output synchronously, in order.
pub trait SpawnSink {
    /// Materialize one slot. The sequencer does not resume until this returns.
    fn spawn(&mut self, event: SpawnEvent);

    fn wave_started(&mut self, _wave_index: usize, _pass: u32) {}

    fn finished(&mut self, _passes: u32) {}

    fn stopped(&mut self, _wave_index: usize, _slot: usize) {}
}

/// Collects spawn events, ignoring lifecycle notifications.
impl SpawnSink for Vec<SpawnEvent> {
    fn spawn(&mut self, event: SpawnEvent) {
        self.push(event);
    }
}

/// Shareable stop request. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What runs when the clock reaches `resume_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    BeginWave,
    Spawn,
    WaveDelay,
    NextWave,
}

pub struct WaveSequencer<R = ChaCha8Rng> {
    waves: Vec<Arc<WaveDefinition>>,
    time_between_waves: f64,
    looping: bool,
    timer: SpawnTimer<R>,
    stop: StopSignal,
    status: SequencerStatus,
    wave_index: usize,
    slot: usize,
    pass: u32,
    step: Step,
    clock: f64,
    resume_at: f64,
}

impl<R: Rng> WaveSequencer<R> {
    /// Validate the wave list and build a running sequencer.
    ///
    /// Path and enemy-kind references are not checked here; the engine
    /// checks them against its tables before calling this.
    pub fn start(
        waves: Vec<Arc<WaveDefinition>>,
        time_between_waves: f64,
        looping: bool,
        timer: SpawnTimer<R>,
    ) -> Result<Self, ConfigError> {
        if waves.is_empty() {
            return Err(ConfigError::EmptyWaveList);
        }
        if !(time_between_waves >= 0.0 && time_between_waves.is_finite()) {
            return Err(ConfigError::NegativeDelay(time_between_waves));
        }
        for (index, wave) in waves.iter().enumerate() {
            wave.validate(index)?;
            if wave.enemy_count() == 0 {
                warn!(wave = index, "wave has no enemies; only its delay will run");
            }
        }
        // A looping pass whose every interval draw is zero would spin forever
        // inside one advance.
        if looping
            && time_between_waves <= 0.0
            && !waves
                .iter()
                .any(|w| w.enemy_count() > 0 && w.timing.minimum.max(w.timing.high()) > 0.0)
        {
            return Err(ConfigError::ZeroLengthLoop);
        }

        info!(
            waves = waves.len(),
            looping, time_between_waves, "wave sequencer started"
        );

        Ok(Self {
            waves,
            time_between_waves,
            looping,
            timer,
            stop: StopSignal::default(),
            status: SequencerStatus::Running,
            wave_index: 0,
            slot: 0,
            pass: 0,
            step: Step::BeginWave,
            clock: 0.0,
            resume_at: 0.0,
        })
    }

    /// Move the clock forward by `dt` and run every due step.
    pub fn advance(&mut self, dt: f64, sink: &mut impl SpawnSink) {
        if self.status != SequencerStatus::Running {
            return;
        }
        self.clock += dt.max(0.0);

        loop {
            if self.stop.is_stopped() {
                self.halt(sink);
                return;
            }
            if self.status != SequencerStatus::Running || self.resume_at > self.clock {
                return;
            }
            self.run_step(sink);
        }
    }

    fn run_step(&mut self, sink: &mut impl SpawnSink) {
        let wave = Arc::clone(&self.waves[self.wave_index]);
        match self.step {
            Step::BeginWave => {
                info!(wave = self.wave_index, pass = self.pass, "wave started");
                sink.wave_started(self.wave_index, self.pass);
                self.step = if wave.enemy_count() == 0 {
                    Step::WaveDelay
                } else {
                    Step::Spawn
                };
            }
            Step::Spawn => {
                debug!(
                    wave = self.wave_index,
                    slot = self.slot,
                    at = self.resume_at,
                    "spawn slot due"
                );
                sink.spawn(SpawnEvent {
                    wave: Arc::clone(&wave),
                    wave_index: self.wave_index,
                    slot: self.slot,
                    scheduled_at: self.resume_at,
                });
                self.slot += 1;
                self.resume_at += self.timer.next(&wave.timing);
                if self.slot >= wave.enemy_count() {
                    self.step = Step::WaveDelay;
                }
            }
            Step::WaveDelay => {
                self.resume_at += self.time_between_waves;
                self.step = Step::NextWave;
            }
            Step::NextWave => {
                self.wave_index += 1;
                self.slot = 0;
                if self.wave_index >= self.waves.len() {
                    self.pass += 1;
                    if self.looping {
                        self.wave_index = 0;
                    } else {
                        // Park on the last wave so views stay in range.
                        self.wave_index = self.waves.len() - 1;
                        self.status = SequencerStatus::Finished;
                        info!(passes = self.pass, "wave sequencer finished");
                        sink.finished(self.pass);
                        return;
                    }
                }
                self.step = Step::BeginWave;
            }
        }
    }

    fn halt(&mut self, sink: &mut impl SpawnSink) {
        self.status = SequencerStatus::Stopped;
        info!(
            wave = self.wave_index,
            slot = self.slot,
            "wave sequencer stopped"
        );
        sink.stopped(self.wave_index, self.slot);
    }

    /// Request a stop. Takes effect before the next spawn is emitted.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Handle that can stop this sequencer from anywhere.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SequencerStatus::Running
    }

    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Completed passes over the wave list.
    pub fn passes(&self) -> u32 {
        self.pass
    }

    /// Sequencer clock in seconds since start.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn view(&self) -> SequencerView {
        SequencerView {
            status: self.status,
            wave_index: self.wave_index,
            slot: self.slot,
            pass: self.pass,
            looping: self.looping,
            resume_in_secs: if self.is_running() {
                (self.resume_at - self.clock).max(0.0)
            } else {
                0.0
            },
        }
    }
}
