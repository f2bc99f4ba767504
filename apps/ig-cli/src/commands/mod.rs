pub mod hook;
pub mod index;
pub mod intents;
pub mod scope;
pub mod trace;
