// Discovery-call instrumentation: form progress, pain/closing scores,
// lead qualification, onboarding wizard state.

pub mod lead;
pub mod onboarding;
pub mod progress;
