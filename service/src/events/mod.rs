pub mod event;
pub mod recorder;

pub use event::{details, Details, Event};
pub use recorder::{Recorder, StepRecorder};
