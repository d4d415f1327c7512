//! Pose telemetry from the companion camera
//!
//! The companion tracks fiducial tags and reports one pose per line:
//!
//! ```text
//! tag_id,yaw,pitch,roll,x,y,z
//! ```
//!
//! `tag_id` is an integer, the remaining six fields are decimal floats.
//! A line is accepted only if it has exactly seven well-formed fields;
//! anything else is rejected whole so consumers never see a partial pose.

/// Number of comma-separated fields in a telemetry line
pub const TELEMETRY_FIELDS: usize = 7;

/// Errors that can occur while parsing a telemetry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Line did not contain exactly [`TELEMETRY_FIELDS`] fields
    FieldCount,
    /// Tag id was not an integer
    InvalidTagId,
    /// One of the pose fields was not a number (index of the field)
    InvalidNumber(u8),
}

/// One decoded pose report
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryFrame {
    /// Fiducial tag identifier
    pub tag_id: i32,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    /// Roll in degrees
    pub roll: f32,
    /// Position x (companion units)
    pub x: f32,
    /// Position y
    pub y: f32,
    /// Position z
    pub z: f32,
}

impl TelemetryFrame {
    /// Parse a single telemetry line (without the terminator)
    pub fn parse(line: &str) -> Result<Self, TelemetryError> {
        let mut fields = [""; TELEMETRY_FIELDS];
        let mut count = 0;

        for field in line.trim().split(',') {
            if count == TELEMETRY_FIELDS {
                return Err(TelemetryError::FieldCount);
            }
            fields[count] = field.trim();
            count += 1;
        }
        if count != TELEMETRY_FIELDS {
            return Err(TelemetryError::FieldCount);
        }

        let tag_id = fields[0]
            .parse::<i32>()
            .map_err(|_| TelemetryError::InvalidTagId)?;

        let mut values = [0.0f32; TELEMETRY_FIELDS - 1];
        for (i, (slot, field)) in values.iter_mut().zip(&fields[1..]).enumerate() {
            *slot = field
                .parse::<f32>()
                .map_err(|_| TelemetryError::InvalidNumber(i as u8 + 1))?;
        }

        Ok(Self {
            tag_id,
            yaw: values[0],
            pitch: values[1],
            roll: values[2],
            x: values[3],
            y: values[4],
            z: values[5],
        })
    }
}
