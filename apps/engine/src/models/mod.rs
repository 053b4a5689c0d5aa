pub mod form;
pub mod session;

pub use form::{FormData, FormState, Selection, SpinPhase, SpinQuestion, SPIN_QUESTIONS};
pub use session::SessionState;
