pub mod answers;
pub mod celebration;
pub mod choice;
pub mod dashboard;
pub mod errors;
pub mod gauge;
pub mod prediction;
pub mod schema;
pub mod session;
pub mod tasks;
pub mod wizard;

pub use answers::{
    AnswerRecord,
    RawInput,
};
pub use errors::CardioError;
pub use prediction::{
    PredictionOutcome,
    PredictionResult,
};
pub use session::{
    Assessment,
    Phase,
};
pub use wizard::Wizard;
