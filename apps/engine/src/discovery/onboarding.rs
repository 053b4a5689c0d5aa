//! Onboarding wizard state machine: a linear stepper over a fixed step
//! list. Completion is persisted, so the wizard stays dismissed across
//! sessions until an explicit reset.

use serde::{Deserialize, Serialize};

/// One wizard screen.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub body: &'static str,
}

/// The wizard script, in display order.
pub const ONBOARDING_STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Benvenuto in QPWONSpin",
        body: "Raccogli le risposte della chiamata di scoperta in un unico posto.",
    },
    OnboardingStep {
        title: "Segui il metodo SPIN",
        body: "Otto domande guidate, due per fase: situazione, problema, implicazione, convenienza.",
    },
    OnboardingStep {
        title: "Leggi i punteggi",
        body: "Barra di avanzamento, pain e closing score si aggiornano mentre scrivi.",
    },
    OnboardingStep {
        title: "Ottieni la raccomandazione",
        body: "Al 60% di completamento SmartMatch propone soluzione e casi studio affini.",
    },
];

/// Wizard position. `InProgress` carries the current step index, always
/// within the step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    NotStarted,
    InProgress(usize),
    Completed,
}

impl OnboardingState {
    /// Reconstructs the state from the persisted completion flag. An
    /// in-progress wizard is never persisted; reloading mid-wizard starts
    /// over.
    pub fn from_completed_flag(completed: bool) -> Self {
        if completed {
            OnboardingState::Completed
        } else {
            OnboardingState::NotStarted
        }
    }

    /// Opens the wizard at the first step. No-op once started or completed.
    pub fn start(self) -> Self {
        match self {
            OnboardingState::NotStarted => OnboardingState::InProgress(0),
            other => other,
        }
    }

    /// Advances one step; advancing past the last step completes the wizard.
    pub fn next(self) -> Self {
        match self {
            OnboardingState::InProgress(i) if i + 1 < ONBOARDING_STEPS.len() => {
                OnboardingState::InProgress(i + 1)
            }
            OnboardingState::InProgress(_) => OnboardingState::Completed,
            other => other,
        }
    }

    /// Steps back, saturating at the first step.
    pub fn prev(self) -> Self {
        match self {
            OnboardingState::InProgress(i) => OnboardingState::InProgress(i.saturating_sub(1)),
            other => other,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, OnboardingState::Completed)
    }

    /// The step currently on screen, if the wizard is open.
    pub fn current_step(&self) -> Option<&'static OnboardingStep> {
        match self {
            OnboardingState::InProgress(i) => ONBOARDING_STEPS.get(*i),
            _ => None,
        }
    }
}
