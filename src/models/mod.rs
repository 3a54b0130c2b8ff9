pub mod labels;
pub mod profile;
pub mod question;

pub use labels::{match_continuation, ContinuationKind};
pub use profile::IdentityProfile;
pub use question::{BlockSnapshot, ClassifiedQuestion, QuestionKind};
