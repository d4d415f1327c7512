//! Three-channel echo timer

use super::{
    CaptureEdge, DiscardReason, EchoOutcome, EchoReading, EdgeEcho, SonarId, ToggleEcho,
    SONAR_COUNT,
};
use crate::config::SonarConfig;

/// A capture interrupt, tagged with the channel that raised it
///
/// The board glue maps its timer/channel pair to one of these and hands it
/// to [`EchoTimer::on_capture`]; nothing in here knows about registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureEvent {
    Sonar1 { edge: CaptureEdge, tick: u32 },
    Sonar2 { edge: CaptureEdge, tick: u32 },
    /// The third channel cannot report which edge it latched
    Sonar3 { tick: u32 },
}

impl CaptureEvent {
    /// Channel this event belongs to
    pub const fn sonar(&self) -> SonarId {
        match self {
            CaptureEvent::Sonar1 { .. } => SonarId::Sonar1,
            CaptureEvent::Sonar2 { .. } => SonarId::Sonar2,
            CaptureEvent::Sonar3 { .. } => SonarId::Sonar3,
        }
    }
}

/// Point-in-time copy of all channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SonarSnapshot {
    pub distance_cm: [u32; SONAR_COUNT],
    pub near: [bool; SONAR_COUNT],
}

impl SonarSnapshot {
    /// Any channel reports an object inside the threshold
    pub fn any_near(&self) -> bool {
        self.near.iter().any(|&n| n)
    }
}

/// Echo timer state for all rangefinders
///
/// Meant to live in a `static`: capture handlers call
/// [`on_capture`](Self::on_capture), everything else reads.
#[derive(Debug)]
pub struct EchoTimer {
    config: SonarConfig,
    sonar1: EdgeEcho,
    sonar2: EdgeEcho,
    sonar3: ToggleEcho,
}

impl EchoTimer {
    pub const fn new(config: SonarConfig) -> Self {
        Self {
            config,
            sonar1: EdgeEcho::new(),
            sonar2: EdgeEcho::new(),
            sonar3: ToggleEcho::new(),
        }
    }

    pub fn config(&self) -> &SonarConfig {
        &self.config
    }

    /// Dispatch a capture to its channel
    pub fn on_capture(&self, event: CaptureEvent) -> EchoOutcome {
        match event {
            CaptureEvent::Sonar1 { edge, tick } => self.sonar1.on_capture(edge, tick, &self.config),
            CaptureEvent::Sonar2 { edge, tick } => self.sonar2.on_capture(edge, tick, &self.config),
            CaptureEvent::Sonar3 { tick } => self.sonar3.on_capture(tick, &self.config),
        }
    }

    /// Last valid distance for a channel
    pub fn distance_cm(&self, sonar: SonarId) -> u32 {
        self.reading(sonar).distance_cm()
    }

    /// Proximity flag from the last valid distance
    pub fn is_near(&self, sonar: SonarId) -> bool {
        self.reading(sonar).is_near()
    }

    /// Number of rejected pulses on a channel
    pub fn discarded(&self, sonar: SonarId) -> u32 {
        self.reading(sonar).discarded()
    }

    pub fn snapshot(&self) -> SonarSnapshot {
        let mut snapshot = SonarSnapshot::default();
        for sonar in SonarId::ALL {
            let reading = self.reading(sonar);
            snapshot.distance_cm[sonar.index()] = reading.distance_cm();
            snapshot.near[sonar.index()] = reading.is_near();
        }
        snapshot
    }

    pub fn reading(&self, sonar: SonarId) -> &EchoReading {
        match sonar {
            SonarId::Sonar1 => self.sonar1.reading(),
            SonarId::Sonar2 => self.sonar2.reading(),
            SonarId::Sonar3 => self.sonar3.reading(),
        }
    }

    /// A trigger period started on a channel's timer
    ///
    /// Called from the timer update interrupt. Returns the reason if a
    /// half-captured pulse had to be dropped.
    pub fn on_period_start(&self, sonar: SonarId) -> Option<DiscardReason> {
        match sonar {
            SonarId::Sonar1 => self.sonar1.on_period_start(),
            SonarId::Sonar2 => self.sonar2.on_period_start(),
            SonarId::Sonar3 => self.sonar3.on_period_start(),
        }
    }
}
