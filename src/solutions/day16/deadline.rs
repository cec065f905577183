use std::time::{Duration, Instant};

use super::error::SolveError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn never() -> Self {
        Self(None)
    }

    pub fn after(timeout: Duration) -> Self {
        Self(Some(Instant::now() + timeout))
    }

    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map_or_else(Self::never, Self::after)
    }

    pub fn check(&self) -> Result<(), SolveError> {
        match self.0 {
            Some(at) if Instant::now() >= at => Err(SolveError::Cancelled),
            _ => Ok(()),
        }
    }
}
