//! Build-time robot configuration
//!
//! `ROBOT_CONFIG` is generated from robot.toml by build.rs, which has
//! already validated it.

use autobot_core::config::{
    ControlConfig, DriveConfig, EncoderConfig, LineConfig, RobotConfig, SonarConfig,
};

include!(concat!(env!("OUT_DIR"), "/robot_config.rs"));
