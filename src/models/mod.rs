pub mod readings;
pub mod robot_status;

// Re-export models for easy access
pub use readings::{BatteryReading, PositionReading, RotationReading, TemperatureReading};
pub use robot_status::{Position, RobotStatus, Timestamp};
