//! Stop-marker notifications sent to the companion board

/// One-shot notification emitted when the robot enters or leaves a stop episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Robot has been on an all-dark marker long enough to count as stopped
    Stopped,
    /// Robot has left the marker and resumed line following
    Resumed,
}

// Wire format tokens
const TOKEN_STOPPED: &[u8] = b"YES\n";
const TOKEN_RESUMED: &[u8] = b"STOP\n";

impl Notification {
    /// Wire bytes for this notification, including the trailing newline
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Notification::Stopped => TOKEN_STOPPED,
            Notification::Resumed => TOKEN_RESUMED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_exact() {
        assert_eq!(Notification::Stopped.as_bytes(), b"YES\n");
        assert_eq!(Notification::Resumed.as_bytes(), b"STOP\n");
    }
}
