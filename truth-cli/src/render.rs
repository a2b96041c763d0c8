use std::fmt::Write;
use truth_types::{GamePhase, MatchState, Player, RoundOutcome};

/// Order the true/false choices are listed in for the current round.
pub const STANDARD_ORDER: [bool; 2] = [true, false];

/// Plain-text frame for the current snapshot.
pub fn render(state: &MatchState, choice_order: [bool; 2]) -> String {
    let mut out = String::new();
    match state.phase {
        GamePhase::Setup => {
            let _ = writeln!(out, "Waiting for a new match...");
        }
        GamePhase::RoundIntro => {
            let _ = writeln!(
                out,
                "Round {} of {} - get ready!",
                state.current_round_index + 1,
                state.total_rounds
            );
            let _ = writeln!(out, "{}", scoreboard(state));
        }
        GamePhase::Playing => {
            let label = if state.is_tiebreaker {
                "SUDDEN DEATH".to_string()
            } else {
                format!("Round {}/{}", state.current_round_index + 1, state.total_rounds)
            };
            let statement = state
                .current_question
                .as_ref()
                .map(|q| q.statement.as_str())
                .unwrap_or("");
            let _ = writeln!(out, "{} [{}s] {}", label, state.time_left, statement);
            let _ = writeln!(out, "{}", prompt(choice_order));
        }
        GamePhase::RoundEnd => {
            match &state.round_outcome {
                Some(RoundOutcome::Answered(answer)) => {
                    let name = &state.player(answer.player_id).name;
                    let verdict = if answer.correct { "correct!" } else { "wrong!" };
                    let _ = writeln!(out, "{} said {}: {}", name, answer.answer, verdict);
                }
                Some(RoundOutcome::TimedOut) | None => {
                    let _ = writeln!(out, "Time's up!");
                }
            }
            if let Some(explanation) = state
                .current_question
                .as_ref()
                .and_then(|q| q.explanation.as_deref())
            {
                let _ = writeln!(out, "{}", explanation);
            }
            let _ = writeln!(out, "{}", scoreboard(state));
        }
        GamePhase::Tiebreaker => {
            let _ = writeln!(out, "It's a tie! Sudden death is next.");
            let _ = writeln!(out, "{}", scoreboard(state));
        }
        GamePhase::GameEnd => {
            match &state.winner {
                Some(winner) => {
                    let _ = writeln!(out, "{} wins!", winner.name);
                }
                None => {
                    let _ = writeln!(out, "No winner this time.");
                }
            }
            let _ = writeln!(out, "{}", scoreboard(state));
            let _ = writeln!(out, "Type r to play again or q to quit.");
        }
    }
    out
}

fn prompt(choice_order: [bool; 2]) -> String {
    let choices: Vec<&str> = choice_order
        .iter()
        .map(|&choice| if choice { "t=true" } else { "f=false" })
        .collect();
    format!(
        "Player 1: 1 + ({})   Player 2: 2 + ({})",
        choices.join(" / "),
        choices.join(" / ")
    )
}

fn scoreboard(state: &MatchState) -> String {
    state
        .players
        .iter()
        .map(player_line)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn player_line(player: &Player) -> String {
    let mut line = match player.lives {
        Some(lives) => format!("{}: {} pts, {} lives", player.name, player.score, lives),
        None => format!("{}: {} pts", player.name, player.score),
    };
    if player.streak > 1 {
        let _ = write!(line, " (streak {})", player.streak);
    }
    line
}
