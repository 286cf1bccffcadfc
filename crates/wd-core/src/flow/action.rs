/// Side effects produced by flow transitions, executed in order by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    /// Ask the backend for a phrase to display.
    GenerateSeedPhrase,
    /// Ask the backend for a phrase under the ceremony bypass; failure is not fatal.
    PrepareBypassPhrase,
    /// Shuffle the displayed phrase into a verification pool.
    BeginSeedVerification,
    CommitOpen,
    CommitCreate,
    CommitRecover,
    /// Drop the pending wallet and any ceremony data.
    DiscardPendingWallet,
    /// Reset the onboarding form.
    ClearDrafts,
    RefreshCatalog,
}
