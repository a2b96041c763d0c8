pub mod game_events;
pub mod match_state;
pub mod question_bank;
pub mod question_selector;
pub mod rng;
pub mod round_timer;
pub mod scoring;

// Re-export main components
pub use game_events::*;
pub use match_state::*;
pub use question_bank::*;
pub use question_selector::*;
pub use rng::*;
pub use round_timer::*;
pub use scoring::*;
