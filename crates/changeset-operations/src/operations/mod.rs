mod autogenerate;

pub use autogenerate::{AutogenerateInput, AutogenerateOperation, AutogenerateOutcome};
