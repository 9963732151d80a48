//! # beacon-delivery
//!
//! The push delivery side of Beacon: turning raw push frames into
//! displayed notifications, routing user interactions back into the
//! application, and the install/activate lifecycle of the delivery
//! process itself. Display and backend acknowledgement are independent
//! failure domains; anything that cannot reach the network falls back to
//! the durable queue store.

pub mod display;
pub mod lifecycle;
pub mod pipeline;
pub mod router;
pub mod sessions;

pub use display::{ChannelDisplayer, Displayer};
pub use lifecycle::{LifecycleController, LifecyclePhase};
pub use pipeline::DeliveryPipeline;
pub use router::{ActionRouter, Interaction, RouteDecision};
pub use sessions::{ForegroundMessage, SessionHub, SessionRegistry};
