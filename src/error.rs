//! Configuration errors
//!
//! The simulation itself cannot fail; a bad world description is rejected
//! before the first tick.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A length, speed or interval that must be strictly positive isn't
    NonPositive { field: &'static str, value: f32 },
    /// A margin that must be zero or more isn't
    Negative { field: &'static str, value: f32 },
    /// Flap impulse must point upward (negative y)
    FlapNotUpward { impulse: f32 },
    /// Actor horizontal position outside `[0, width)`
    ActorOutsideWorld { actor_x: f32, width: f32 },
    /// Forgiveness would shrink the collision radius to nothing
    ForgivenessTooLarge { forgiveness: f32, radius: f32 },
    /// Ground leaves no playable sky
    GroundTooTall { ground: f32, height: f32 },
    /// Gap plus margins don't fit between ceiling and ground
    GapDoesNotFit { min_top: i32, max_top: i32 },
    /// JSON document could not be parsed
    Parse { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::FlapNotUpward { impulse } => {
                write!(f, "flap impulse must be negative (upward), got {impulse}")
            }
            Self::ActorOutsideWorld { actor_x, width } => write!(
                f,
                "actor x {actor_x} lies outside the world (width {width})"
            ),
            Self::ForgivenessTooLarge {
                forgiveness,
                radius,
            } => write!(
                f,
                "hit forgiveness {forgiveness} must be smaller than actor radius {radius}"
            ),
            Self::GroundTooTall { ground, height } => write!(
                f,
                "ground height {ground} leaves no sky in a world {height} tall"
            ),
            Self::GapDoesNotFit { min_top, max_top } => write!(
                f,
                "gap does not fit: gap-top range {min_top}..={max_top} is empty"
            ),
            Self::Parse { message } => write!(f, "invalid world config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
