pub mod api;

pub use api::{
    PredictorClient,
    PredictorConfig,
};
