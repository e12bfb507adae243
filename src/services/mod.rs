pub mod booking;
pub mod calendar;
pub mod card;
pub mod drag;
pub mod ics;
pub mod remote;
pub mod validation;
