//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                |
//! |------------|--------------------|----------------------------|
//! | `hardware` | PeripheralManager  | ESP32 GPIO (host pad model)|
//! |            | LedPin             |                            |
//! |            | ButtonInput        |                            |
//! | `log_sink` | EventSink          | Serial log output          |

pub mod hardware;
pub mod log_sink;
