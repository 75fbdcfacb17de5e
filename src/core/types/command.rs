//! Command record for a queried process

use serde::{Deserialize, Serialize};
use std::fmt;

/// The command used to start a process: image path plus argument strings.
///
/// Only the image path is recovered today; `args` stays empty until
/// argument recovery from the target's process parameters is implemented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessCommand {
    /// Native path of the on-disk image the process was started from
    pub image: String,
    /// Ordered argument strings
    pub args: Vec<String>,
}

impl ProcessCommand {
    /// Create a command record carrying only the image path
    pub fn from_image(image: impl Into<String>) -> Self {
        ProcessCommand {
            image: image.into(),
            args: Vec::new(),
        }
    }

    /// Last component of the image path
    pub fn image_name(&self) -> &str {
        self.image.rsplit('\\').next().unwrap_or(&self.image)
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.image)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
