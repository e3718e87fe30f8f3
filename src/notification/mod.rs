//! Typed publish/subscribe.
//!
//! Subscribers register interest in an (event tag, publisher tag) pair.
//! Publishing an event delivers it, synchronously and in registration
//! order, to every subscriber registered for exactly that pair.
//!
//! - Tags are compile-time values (`Event::Tag`, `Publisher::Tag`), not
//!   runtime type identity
//! - Registration and removal are safe from any thread
//! - A publish sees a consistent snapshot of the subscriber list

mod bus;
mod error;
mod subscriber;
mod tags;

pub use bus::NotificationBus;
pub use error::PublishError;
pub use subscriber::{Subscriber, SubscriberRef};
pub use tags::{Event, Publisher, Tag};
