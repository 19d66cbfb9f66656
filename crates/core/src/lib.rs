#![forbid(unsafe_code)]

pub mod countdown;
pub mod model;
pub mod session;
pub mod time;

pub use countdown::Countdown;
pub use time::Clock;

pub use session::{
    ExerciseSession, REST_SECONDS, SessionPhase, SessionProgress, SessionTiming, Transition,
};
