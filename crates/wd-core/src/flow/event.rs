/// Events that drive the onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    // Dialog control
    ShowOnboarding,
    HideOnboarding { session_open: bool },

    // Submits (already validated by the draft)
    SubmitOpen,
    SubmitCreate { bypass_ceremony: bool },
    SubmitRecover,

    // Seed ceremony
    PhraseGenerated,
    PhraseGenerationFailed,
    SeedSaved,
    SeedVerified,
    SeedMismatch,
    RetryCommit,

    // Results (from orchestrator)
    CommitSucceeded,
    CommitFailed { message: String },

    // Control
    Cancel,
    DismissError,

    // Session changes outside the dialog
    SessionOpened,
    SessionClosed,
}
