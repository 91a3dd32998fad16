//! Session state, command dispatch, clock, and persistence.
//!
//! A `Session` wraps the engine for one player: it owns the board, the
//! level counter, and the hint budget, and turns `Command`s into
//! `Outcome`s. Rendering, audio, and storage I/O stay with the host.

pub mod clock;
pub mod command;
pub mod persist;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use command::{Command, Outcome};
pub use persist::{MemoryStore, PersistenceStore, SessionRecord};
pub use state::{Session, Status};
