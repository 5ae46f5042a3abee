// crates/pmodcal-core/src/verify/phase.rs

/// Where a verification run is.
///
/// `Init -> LoadCalTable -> (Drive -> Settle -> Sample -> Release)* -> Done`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    LoadCalTable,
    Drive,
    Settle,
    Sample,
    Release,
    Done,
}

impl Phase {
    pub fn can_advance_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Init, LoadCalTable)
                | (LoadCalTable, Drive)
                | (LoadCalTable, Done)
                | (Drive, Settle)
                | (Settle, Sample)
                | (Sample, Release)
                | (Release, Drive)
                | (Release, Done)
        )
    }
}
