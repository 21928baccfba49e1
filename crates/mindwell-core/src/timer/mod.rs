mod engine;
mod technique;

pub use engine::{SessionState, SessionTimer};
pub use technique::{BreathingTechnique, Phase};
