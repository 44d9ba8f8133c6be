//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                  |
//! |-------------|---------------------|------------------------------|
//! | `hardware`  | SensorPort          | SHT3x over I2C (or sim)      |
//! |             | ActuatorPort        | Heater / humidifier relays   |
//! | `log_sink`  | EventSink           | Serial log output            |
//! | `telemetry` | EventSink           | JSON outbox for the uplink   |
//! | `time`      | TimePort            | ESP32 system timer           |

pub mod hardware;
pub mod log_sink;
pub mod telemetry;
pub mod time;
