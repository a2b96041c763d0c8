use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval, sleep_until};
use tracing::{debug, info};
use truth_core::MatchMachine;
use truth_types::{GamePhase, MatchSettings, MatchState, PlayerSlot, RoundOutcome};

use crate::render::{STANDARD_ORDER, render};

/// Input coming from the players' side of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    Answer { player: PlayerSlot, answer: bool },
    PlayAgain,
    Quit,
}

/// How long the screen holds between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Before every regular round
    pub round_intro: Duration,
    pub correct_feedback: Duration,
    pub wrong_feedback: Duration,
    pub timeout_feedback: Duration,
    /// Between the tie announcement and the sudden-death question
    pub sudden_death: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            round_intro: Duration::from_millis(5000),
            correct_feedback: Duration::from_millis(1500),
            wrong_feedback: Duration::from_millis(2000),
            timeout_feedback: Duration::from_millis(2000),
            sudden_death: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    phase: GamePhase,
    round_index: u32,
    rounds_played: u32,
    time_left: u32,
    is_tiebreaker: bool,
}

impl Frame {
    fn of(state: &MatchState) -> Self {
        Self {
            phase: state.phase,
            round_index: state.current_round_index,
            rounds_played: state.rounds_played,
            time_left: state.time_left,
            is_tiebreaker: state.is_tiebreaker,
        }
    }
}

/// Owns a [`MatchMachine`] and feeds it wall-clock time: one tick per second
/// while a round is live, plus the pauses before a round and after feedback.
pub struct MatchDriver {
    machine: MatchMachine,
    settings: MatchSettings,
    pacing: Pacing,
    choice_order: [bool; 2],
    last_frame: Option<Frame>,
}

impl MatchDriver {
    pub fn new(machine: MatchMachine, settings: MatchSettings, pacing: Pacing) -> Self {
        Self {
            machine,
            settings,
            pacing,
            choice_order: STANDARD_ORDER,
            last_frame: None,
        }
    }

    pub fn machine(&self) -> &MatchMachine {
        &self.machine
    }

    /// Play matches until the players quit or the command channel closes.
    /// Returns the state of the last match as it stood when play stopped.
    pub async fn run<W: Write>(
        mut self,
        commands: &mut mpsc::Receiver<DriverCommand>,
        out: &mut W,
    ) -> Result<MatchState> {
        self.machine.initialize(self.settings.clone());

        let mut clock = interval(Duration::from_secs(1));
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut waiting: Option<(GamePhase, Instant)> = None;

        loop {
            self.render_if_changed(out)?;

            let phase = self.machine.phase();
            waiting = match (waiting, self.pause_for(self.machine.state())) {
                (Some((waiting_on, deadline)), Some(_)) if waiting_on == phase => {
                    Some((waiting_on, deadline))
                }
                (_, Some(pause)) => Some((phase, Instant::now() + pause)),
                (_, None) => None,
            };
            let deadline = waiting.map(|(_, deadline)| deadline);

            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(DriverCommand::Quit) => {
                        info!("Players quit during {:?}", self.machine.phase());
                        let final_state = self.machine.snapshot();
                        self.machine.reset();
                        return Ok(final_state);
                    }
                    Some(DriverCommand::Answer { player, answer }) => {
                        if !self.machine.submit_answer(player, answer) {
                            debug!("Answer from {} was not accepted", player);
                        }
                    }
                    Some(DriverCommand::PlayAgain) => {
                        if self.machine.state().is_over() {
                            self.machine.reset();
                            self.machine.initialize(self.settings.clone());
                            self.last_frame = None;
                        } else {
                            debug!("Ignoring replay while a match is running");
                        }
                    }
                },
                _ = clock.tick(), if self.machine.is_timer_running() => {
                    self.machine.tick();
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    waiting = None;
                    self.machine.advance();
                    if self.machine.phase() == GamePhase::Playing {
                        clock.reset();
                        self.shuffle_choices();
                    }
                }
            }
        }
    }

    fn pause_for(&self, state: &MatchState) -> Option<Duration> {
        match state.phase {
            GamePhase::RoundIntro => Some(self.pacing.round_intro),
            GamePhase::Tiebreaker => Some(self.pacing.sudden_death),
            GamePhase::RoundEnd => Some(match &state.round_outcome {
                Some(RoundOutcome::Answered(answer)) if answer.correct => {
                    self.pacing.correct_feedback
                }
                Some(RoundOutcome::Answered(_)) => self.pacing.wrong_feedback,
                Some(RoundOutcome::TimedOut) | None => self.pacing.timeout_feedback,
            }),
            GamePhase::Setup | GamePhase::Playing | GamePhase::GameEnd => None,
        }
    }

    fn shuffle_choices(&mut self) {
        self.choice_order = if self.settings.button_shuffle && rand::random::<bool>() {
            [false, true]
        } else {
            STANDARD_ORDER
        };
    }

    fn render_if_changed<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let state = self.machine.state();
        let frame = Frame::of(state);
        if self.last_frame == Some(frame) {
            return Ok(());
        }
        self.last_frame = Some(frame);
        out.write_all(render(state, self.choice_order).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
