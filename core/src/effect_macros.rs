//! Declarative macros for building effects.
//!
//! These keep reducer bodies readable when they return async work,
//! delayed actions, or cancellable groups.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use seatmap_core::async_effect;
///
/// async_effect! {
///     listener.booking_completed(&record);
///     Some(SeatMapAction::BookingCompleted { record, completed_at })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use seatmap_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(100),
///     action: SeatMapAction::RevealNext { ticket }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Create an `Effect::Cancellable` registered under the given id
///
/// # Example
///
/// ```rust,ignore
/// use seatmap_core::{cancellable, delay};
///
/// cancellable! {
///     id: "seat-reveal",
///     effect: delay! { duration, action: SeatMapAction::RevealNext { ticket } }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $crate::effect::EffectId::new($id),
            effect: ::std::boxed::Box::new($effect),
        }
    };
}
