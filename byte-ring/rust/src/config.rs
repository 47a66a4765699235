use std::{
    env::{self, VarError},
    fmt::{self, Display, Formatter},
    num::ParseIntError,
};

use thiserror::Error;
use tracing::info;

use crate::ring_buffer::{RingBuffer, RingBufferError};

pub const CAPACITY_VAR: &str = "BYTERING_CAPACITY";
pub const MESSAGE_VAR: &str = "BYTERING_MESSAGE";

const DEFAULT_CAPACITY: usize = 16;
const DEFAULT_MESSAGE: &str = "hello from the staging buffer";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BYTERING_CAPACITY is not a valid capacity: {0}")]
    Capacity(#[from] ParseIntError),
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
    #[error("failed to create ring buffer from config: {0}")]
    Buffer(#[from] RingBufferError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    capacity: usize,
    message: String,
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "capacity={} message_len={}", self.capacity, self.message.len())
    }
}

impl Config {
    /// Reads `BYTERING_CAPACITY` and `BYTERING_MESSAGE`, falling back to defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        let capacity = var(CAPACITY_VAR)?;
        let message = var(MESSAGE_VAR)?;
        let config = Self::parse(capacity.as_deref(), message)?;

        info!(
            capacity = config.capacity,
            message_len = config.message.len(),
            "initialized config"
        );

        Ok(config)
    }

    pub fn parse(capacity: Option<&str>, message: Option<String>) -> Result<Self, ConfigError> {
        let capacity = match capacity {
            Some(value) => value.trim().parse::<usize>()?,
            None => DEFAULT_CAPACITY,
        };

        Ok(Self {
            capacity,
            message: message.unwrap_or_else(|| DEFAULT_MESSAGE.to_owned()),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ring_buffer(&self) -> Result<RingBuffer, ConfigError> {
        Ok(RingBuffer::new(self.capacity)?)
    }
}

fn var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name)),
    }
}
